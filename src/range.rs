use serde::{Deserialize, Serialize};

use crate::{Date, DateFormat, parse_date};

/// The raw `{start, end}` text a range picker holds while the user types.
///
/// Missing and empty sides are treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeText {
    pub start: Option<String>,
    pub end:   Option<String>,
}

impl RangeText {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end:   Some(end.into()),
        }
    }

    /// The start text, or `None` when absent or empty.
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref().filter(|s| !s.is_empty())
    }

    /// The end text, or `None` when absent or empty.
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref().filter(|s| !s.is_empty())
    }
}

/// A date range whose ends may be unset.
/// When both ends are set, start is on or before end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeParts")]
pub struct DateRange {
    start: Option<Date>,
    end:   Option<Date>,
}

#[derive(Deserialize)]
struct DateRangeParts {
    #[serde(default)]
    start: Option<Date>,
    #[serde(default)]
    end:   Option<Date>,
}

impl TryFrom<DateRangeParts> for DateRange {
    type Error = RangeError;

    fn try_from(parts: DateRangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.start, parts.end)
    }
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: Date, end: Date },
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if both ends are set and start > end.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Self, RangeError> {
        match (start, end) {
            (Some(start), Some(end)) if start > end => Err(RangeError::InvalidRange { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    pub const fn start(&self) -> Option<Date> {
        self.start
    }

    pub const fn end(&self) -> Option<Date> {
        self.end
    }

    /// `true` when both ends are set.
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Checks if the range contains a given date. An unset end does not bound
    /// the range on that side.
    pub fn contains(&self, date: &Date) -> bool {
        self.start.is_none_or(|start| start <= *date) && self.end.is_none_or(|end| *date <= end)
    }
}

/// Parses both sides of `text` with `format`.
///
/// A side that is empty or does not parse yet is left unset, so half-typed
/// input never produces an ordering error.
///
/// # Errors
/// Returns `RangeError::InvalidRange` when both sides parse and start > end.
pub fn parse_date_range(text: &RangeText, format: &DateFormat) -> Result<DateRange, RangeError> {
    let start = text.start().and_then(|s| parse_date(s, format));
    let end = text.end().and_then(|s| parse_date(s, format));
    DateRange::new(start, end)
}

/// `false` only when both sides parse and the start is after the end.
pub fn validate_date_range_order(text: &RangeText, format: &DateFormat) -> bool {
    parse_date_range(text, format)
        .inspect_err(|err| tracing::trace!(%err, "date range out of order"))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, range_text};

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          Option<Date>,
            end:            Option<Date>,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          Some(date(2024, 1, 5)),
                end:            Some(date(2024, 1, 10)),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          Some(date(2024, 1, 10)),
                end:            Some(date(2024, 1, 5)),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          Some(date(2024, 1, 5)),
                end:            Some(date(2024, 1, 5)),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
            TestCase {
                start:          None,
                end:            Some(date(2024, 1, 5)),
                should_succeed: true,
                description:    "open start",
            },
            TestCase {
                start:          None,
                end:            None,
                should_succeed: true,
                description:    "fully open",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_validate_date_range_order() {
        let format = DateFormat::default();

        assert!(!validate_date_range_order(
            &range_text("10/01/2024", "05/01/2024"),
            &format
        ));
        assert!(validate_date_range_order(
            &range_text("05/01/2024", "10/01/2024"),
            &format
        ));
        assert!(validate_date_range_order(
            &range_text("05/01/2024", "05/01/2024"),
            &format
        ));
    }

    #[test]
    fn test_incomplete_input_is_not_an_order_error() {
        let format = DateFormat::default();

        assert!(validate_date_range_order(&RangeText::default(), &format));
        assert!(validate_date_range_order(
            &range_text("10/01/2024", ""),
            &format
        ));
        assert!(validate_date_range_order(
            &range_text("10/01/2024", "05/01/20"),
            &format
        ));
        assert!(validate_date_range_order(
            &range_text("31/02/2024", "05/01/2024"),
            &format
        ));
    }

    #[test]
    fn test_parse_date_range() {
        let format = DateFormat::default();
        let range = parse_date_range(&range_text("05/01/2024", ""), &format).unwrap();
        assert_eq!(range.start(), Some(date(2024, 1, 5)));
        assert_eq!(range.end(), None);
        assert!(!range.is_complete());

        let range = parse_date_range(&range_text("05/01/2024", "05/01/2024"), &format).unwrap();
        assert!(range.is_complete());

        let err = parse_date_range(&range_text("10/01/2024", "05/01/2024"), &format).unwrap_err();
        assert_eq!(
            err,
            RangeError::InvalidRange {
                start: date(2024, 1, 10),
                end:   date(2024, 1, 5),
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid date range: start (2024-01-10) is after end (2024-01-05)"
        );
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(Some(date(2024, 1, 5)), Some(date(2024, 1, 10))).unwrap();
        assert!(range.contains(&date(2024, 1, 5)));
        assert!(range.contains(&date(2024, 1, 10)));
        assert!(!range.contains(&date(2024, 1, 4)));
        assert!(!range.contains(&date(2024, 1, 11)));

        let open_end = DateRange::new(Some(date(2024, 1, 5)), None).unwrap();
        assert!(open_end.contains(&date(9999, 12, 31)));
        assert!(!open_end.contains(&date(2024, 1, 4)));
    }

    #[test]
    fn test_range_text_serde() {
        let text: RangeText = serde_json::from_str(r#"{"start":"05/01/2024"}"#).unwrap();
        assert_eq!(text.start(), Some("05/01/2024"));
        assert_eq!(text.end(), None);

        let empty: RangeText = serde_json::from_str(r#"{"start":"","end":""}"#).unwrap();
        assert_eq!(empty.start(), None);
    }

    #[test]
    fn test_date_range_serde_validation() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-01-05","end":"2024-01-10"}"#).unwrap();
        assert_eq!(ok.end(), Some(date(2024, 1, 10)));

        let bad: Result<DateRange, _> =
            serde_json::from_str(r#"{"start":"2024-01-10","end":"2024-01-05"}"#);
        assert!(bad.is_err());
    }
}
