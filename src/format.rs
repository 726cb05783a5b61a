//! Token patterns such as `DD/MM/YYYY` and the parser/formatter they drive.
//!
//! | Token  | Field | Width                         |
//! | ------ | ----- | ----------------------------- |
//! | `YYYY` | year  | exactly 4 digits              |
//! | `MM`   | month | exactly 2 digits              |
//! | `M`    | month | 1 or 2 digits, written bare   |
//! | `DD`   | day   | exactly 2 digits              |
//! | `D`    | day   | 1 or 2 digits, written bare   |
//!
//! Any other character is a literal separator that must appear verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DATE_FORMAT, ISO_DATE_FORMAT};
use crate::prelude::*;
use crate::{Date, ParseError};

/// The calendar component a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// A placeholder inside a date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Token {
    #[display(fmt = "YYYY")]
    Year,
    #[display(fmt = "MM")]
    PaddedMonth,
    #[display(fmt = "M")]
    Month,
    #[display(fmt = "DD")]
    PaddedDay,
    #[display(fmt = "D")]
    Day,
}

impl Token {
    fn from_run(letter: char, len: usize) -> Option<Self> {
        match (letter, len) {
            ('Y', 4) => Some(Self::Year),
            ('M', 2) => Some(Self::PaddedMonth),
            ('M', 1) => Some(Self::Month),
            ('D', 2) => Some(Self::PaddedDay),
            ('D', 1) => Some(Self::Day),
            _ => None,
        }
    }

    pub const fn field(self) -> Field {
        match self {
            Self::Year => Field::Year,
            Self::PaddedMonth | Self::Month => Field::Month,
            Self::PaddedDay | Self::Day => Field::Day,
        }
    }

    /// Fewest digits the token accepts.
    const fn min_width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::PaddedMonth | Self::PaddedDay => 2,
            Self::Month | Self::Day => 1,
        }
    }

    /// Most digits the token accepts.
    const fn max_width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::PaddedMonth | Self::PaddedDay | Self::Month | Self::Day => 2,
        }
    }

    const fn is_variable_width(self) -> bool {
        self.min_width() != self.max_width()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Token(Token),
    Literal(String),
}

/// Why a pattern string cannot be used as a [`DateFormat`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Unsupported token {0:?} (expected YYYY, MM, M, DD or D)")]
    UnsupportedToken(String),
    #[error("Format has more than one {0} token")]
    DuplicateField(Field),
    #[error("Format has no {0} token")]
    MissingField(Field),
    #[error("Token {first} is variable-width and cannot be followed directly by {second}")]
    AmbiguousTokens { first: Token, second: Token },
    #[error("Token {token} is variable-width and cannot be followed by the digit literal {literal:?}")]
    DigitAfterVariableToken { token: Token, literal: String },
}

/// A compiled date pattern.
///
/// Holds exactly one year, one month and one day token, in any order, with
/// arbitrary literal separators between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateFormat {
    pattern:  String,
    segments: Vec<Segment>,
}

impl DateFormat {
    /// Compiles `pattern`.
    ///
    /// # Errors
    /// Returns a `FormatError` if the pattern contains an unknown run of `Y`,
    /// `M` or `D`, misses or repeats a field, or places a variable-width token
    /// directly before another token or a literal starting with a digit.
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if !matches!(c, 'Y' | 'M' | 'D') {
                literal.push(c);
                continue;
            }
            let mut len = 1;
            while chars.next_if_eq(&c).is_some() {
                len += 1;
            }
            let token = Token::from_run(c, len)
                .ok_or_else(|| FormatError::UnsupportedToken(c.to_string().repeat(len)))?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(token));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self::check_fields(&segments)?;

        Ok(Self {
            pattern: pattern.to_owned(),
            segments,
        })
    }

    fn check_fields(segments: &[Segment]) -> Result<(), FormatError> {
        for field in [Field::Year, Field::Month, Field::Day] {
            match tokens_of(segments).filter(|token| token.field() == field).count() {
                0 => return Err(FormatError::MissingField(field)),
                1 => {}
                _ => return Err(FormatError::DuplicateField(field)),
            }
        }

        for pair in segments.windows(2) {
            match pair {
                [Segment::Token(first), Segment::Token(second)] if first.is_variable_width() => {
                    return Err(FormatError::AmbiguousTokens {
                        first:  *first,
                        second: *second,
                    });
                }
                [Segment::Token(token), Segment::Literal(literal)]
                    if token.is_variable_width() && literal.starts_with(|c: char| c.is_ascii_digit()) =>
                {
                    return Err(FormatError::DigitAfterVariableToken {
                        token:   *token,
                        literal: literal.clone(),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// `YYYY-MM-DD`, used by [`Date`]'s `Display` and `FromStr`.
    pub fn iso() -> Self {
        Self {
            pattern:  ISO_DATE_FORMAT.to_owned(),
            segments: vec![
                Segment::Token(Token::Year),
                Segment::Literal("-".to_owned()),
                Segment::Token(Token::PaddedMonth),
                Segment::Literal("-".to_owned()),
                Segment::Token(Token::PaddedDay),
            ],
        }
    }

    /// The source pattern, e.g. `DD/MM/YYYY`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Tokens in pattern order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        tokens_of(&self.segments)
    }

    /// Parses `text` into a calendar date.
    ///
    /// Surrounding whitespace is ignored, except on a side where the pattern
    /// itself starts or ends with whitespace: that side is matched verbatim.
    /// Digits are consumed per token width, literal separators must match
    /// exactly and nothing may follow the last segment.
    ///
    /// # Errors
    /// Returns a `ParseError` describing the first mismatch, or the calendar
    /// rule the extracted numbers break.
    pub fn parse(&self, text: &str) -> Result<Date, ParseError> {
        let mut rest = text;
        if !self.pattern.starts_with(char::is_whitespace) {
            rest = rest.trim_start();
        }
        if !self.pattern.ends_with(char::is_whitespace) {
            rest = rest.trim_end();
        }
        if rest.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (mut year, mut month, mut day) = (0_u16, 0_u16, 0_u16);

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    rest = rest.strip_prefix(literal.as_str()).ok_or_else(|| {
                        ParseError::UnexpectedText {
                            expected: literal.clone(),
                            found:    rest.to_owned(),
                        }
                    })?;
                }
                Segment::Token(token) => {
                    let (digits, tail) = split_digits(rest, token.max_width());
                    if digits.len() < token.min_width() {
                        return Err(ParseError::ExpectedDigits {
                            token: *token,
                            found: rest.to_owned(),
                        });
                    }
                    let value = digits
                        .parse::<u16>()
                        .map_err(|_| ParseError::ExpectedDigits {
                            token: *token,
                            found: digits.to_owned(),
                        })?;
                    match token.field() {
                        Field::Year => year = value,
                        Field::Month => month = value,
                        Field::Day => day = value,
                    }
                    rest = tail;
                }
            }
        }

        if !rest.is_empty() {
            return Err(ParseError::TrailingInput(rest.to_owned()));
        }

        // Month and day tokens are at most two digits wide.
        Date::new(year, narrow(month), narrow(day))
    }

    /// Writes `date` using this pattern.
    pub fn display<'a>(&'a self, date: &'a Date) -> impl fmt::Display + 'a {
        Formatted { format: self, date }
    }
}

fn tokens_of(segments: &[Segment]) -> impl Iterator<Item = Token> + '_ {
    segments.iter().filter_map(|segment| match segment {
        Segment::Token(token) => Some(*token),
        Segment::Literal(_) => None,
    })
}

fn split_digits(s: &str, max: usize) -> (&str, &str) {
    let len = s
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    s.split_at(len)
}

fn narrow(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

struct Formatted<'a> {
    format: &'a DateFormat,
    date:   &'a Date,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.format.segments {
            match segment {
                Segment::Literal(literal) => f.write_str(literal)?,
                Segment::Token(Token::Year) => write!(f, "{:04}", self.date.year())?,
                Segment::Token(Token::PaddedMonth) => write!(f, "{:02}", self.date.month())?,
                Segment::Token(Token::Month) => write!(f, "{}", self.date.month())?,
                Segment::Token(Token::PaddedDay) => write!(f, "{:02}", self.date.day())?,
                Segment::Token(Token::Day) => write!(f, "{}", self.date.day())?,
            }
        }
        Ok(())
    }
}

impl Default for DateFormat {
    /// `DD/MM/YYYY`
    fn default() -> Self {
        Self {
            pattern:  DEFAULT_DATE_FORMAT.to_owned(),
            segments: vec![
                Segment::Token(Token::PaddedDay),
                Segment::Literal("/".to_owned()),
                Segment::Token(Token::PaddedMonth),
                Segment::Literal("/".to_owned()),
                Segment::Token(Token::Year),
            ],
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for DateFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for DateFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses `text` with `format`, or `None` if it is not a valid date.
///
/// Out-of-range components are rejected here: `31/02/2021` is `None`.
pub fn parse_date(text: &str, format: &DateFormat) -> Option<Date> {
    format
        .parse(text)
        .inspect_err(|err| tracing::trace!(%err, text, format = %format, "rejected date text"))
        .ok()
}

/// Formats `date` with `format`. Inverse of [`parse_date`].
pub fn format_date(date: &Date, format: &DateFormat) -> String {
    format.display(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use proptest::prelude::*;

    fn dmy() -> DateFormat {
        DateFormat::default()
    }

    #[test]
    fn test_default_matches_compiled_pattern() {
        assert_eq!(DateFormat::default(), DateFormat::new("DD/MM/YYYY").unwrap());
        assert_eq!(DateFormat::iso(), DateFormat::new("YYYY-MM-DD").unwrap());
    }

    #[test]
    fn test_parse_day_month_year() {
        assert_eq!(parse_date("15/08/1991", &dmy()), Some(date(1991, 8, 15)));
        assert_eq!(parse_date(" 15/08/1991 ", &dmy()), Some(date(1991, 8, 15)));
    }

    #[test]
    fn test_parse_rejects_impossible_days() {
        assert_eq!(parse_date("31/02/2021", &dmy()), None);
        assert_eq!(parse_date("29/02/2020", &dmy()), Some(date(2020, 2, 29)));
        assert_eq!(parse_date("29/02/2021", &dmy()), None);
        assert_eq!(parse_date("29/02/1900", &dmy()), None);
        assert_eq!(parse_date("29/02/2000", &dmy()), Some(date(2000, 2, 29)));
        assert_eq!(parse_date("31/04/2024", &dmy()), None);
        assert_eq!(parse_date("00/04/2024", &dmy()), None);
    }

    #[test]
    fn test_parse_errors() {
        let format = dmy();

        assert_eq!(format.parse(""), Err(ParseError::EmptyInput));
        assert!(matches!(
            format.parse("15/13/2024"),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            format.parse("32/01/2024"),
            Err(ParseError::InvalidDay { day: 32, .. })
        ));
        assert!(matches!(
            format.parse("15/08/0000"),
            Err(ParseError::InvalidYear(0))
        ));
        assert!(matches!(
            format.parse("1/08/2024"),
            Err(ParseError::ExpectedDigits {
                token: Token::PaddedDay,
                ..
            })
        ));
        assert!(matches!(
            format.parse("aa/08/2024"),
            Err(ParseError::ExpectedDigits { .. })
        ));
        assert!(matches!(
            format.parse("15-08-2024"),
            Err(ParseError::UnexpectedText { .. })
        ));
        assert!(matches!(
            format.parse("15/08/20245"),
            Err(ParseError::TrailingInput(_))
        ));
        assert!(matches!(
            format.parse("15/08/20"),
            Err(ParseError::ExpectedDigits {
                token: Token::Year,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_input_does_not_parse() {
        for partial in ["1", "15", "15/", "15/0", "15/08", "15/08/", "15/08/202"] {
            assert_eq!(parse_date(partial, &dmy()), None, "{partial:?}");
        }
    }

    #[test]
    fn test_variable_width_tokens() {
        let format = DateFormat::new("M/D/YYYY").unwrap();
        assert_eq!(format.parse("8/5/1991"), Ok(date(1991, 8, 5)));
        assert_eq!(format.parse("08/15/1991"), Ok(date(1991, 8, 15)));
        assert_eq!(format_date(&date(1991, 8, 5), &format), "8/5/1991");
    }

    #[test]
    fn test_adjacent_fixed_width_tokens() {
        let format = DateFormat::new("YYYYMMDD").unwrap();
        assert_eq!(format.parse("20240229"), Ok(date(2024, 2, 29)));
        assert_eq!(format_date(&date(2024, 2, 29), &format), "20240229");
    }

    #[test]
    fn test_multi_character_literals() {
        let format = DateFormat::new("DD. MM. YYYY").unwrap();
        assert_eq!(format.parse("01. 12. 2023"), Ok(date(2023, 12, 1)));
        assert!(format.parse("01.12.2023").is_err());
    }

    #[test]
    fn test_edge_whitespace_in_pattern() {
        let trailing = DateFormat::new("DD/MM/YYYY ").unwrap();
        let text = format_date(&date(2024, 8, 15), &trailing);
        assert_eq!(text, "15/08/2024 ");
        assert_eq!(parse_date(&text, &trailing), Some(date(2024, 8, 15)));
        assert_eq!(parse_date(" 15/08/2024 ", &trailing), Some(date(2024, 8, 15)));
        assert_eq!(parse_date("15/08/2024", &trailing), None);

        let leading = DateFormat::new(" DD/MM/YYYY").unwrap();
        assert_eq!(parse_date(" 15/08/2024 ", &leading), Some(date(2024, 8, 15)));
        assert_eq!(parse_date("15/08/2024", &leading), None);
    }

    #[test]
    fn test_format_pads_components() {
        assert_eq!(format_date(&date(5, 1, 9), &dmy()), "09/01/0005");
        assert_eq!(format_date(&date(2024, 1, 9), &DateFormat::iso()), "2024-01-09");
    }

    #[test]
    fn test_format_errors() {
        assert_eq!(
            DateFormat::new("DD/MM/YY"),
            Err(FormatError::UnsupportedToken("YY".to_owned()))
        );
        assert_eq!(
            DateFormat::new("DD/MM"),
            Err(FormatError::MissingField(Field::Year))
        );
        assert_eq!(
            DateFormat::new("DD/MM/YYYY/DD"),
            Err(FormatError::DuplicateField(Field::Day))
        );
        assert_eq!(
            DateFormat::new("MDYYYY"),
            Err(FormatError::AmbiguousTokens {
                first:  Token::Month,
                second: Token::Day,
            })
        );
        assert_eq!(
            DateFormat::new("D0MM/YYYY"),
            Err(FormatError::DigitAfterVariableToken {
                token:   Token::Day,
                literal: "0".to_owned(),
            })
        );
        assert_eq!(
            DateFormat::new("YYYY-M1-DD"),
            Err(FormatError::DigitAfterVariableToken {
                token:   Token::Month,
                literal: "1-".to_owned(),
            })
        );
        assert_eq!(DateFormat::new(""), Err(FormatError::MissingField(Field::Year)));
    }

    #[test]
    fn test_tokens_in_order() {
        let format = DateFormat::new("YYYY/M/DD").unwrap();
        let tokens: Vec<_> = format.tokens().collect();
        assert_eq!(tokens, [Token::Year, Token::Month, Token::PaddedDay]);
        assert_eq!(format.pattern(), "YYYY/M/DD");
        assert_eq!(format.to_string(), "YYYY/M/DD");
    }

    #[test]
    fn test_serde_pattern_string() {
        let json = serde_json::to_string(&dmy()).unwrap();
        assert_eq!(json, r#""DD/MM/YYYY""#);
        let parsed: DateFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dmy());

        let bad: Result<DateFormat, _> = serde_json::from_str(r#""DD/MM""#);
        assert!(bad.is_err());
    }

    fn any_date() -> impl Strategy<Value = Date> {
        (1_u16..=9999, 1_u8..=12, 1_u8..=31)
            .prop_filter_map("day past end of month", |(y, m, d)| Date::new(y, m, d).ok())
    }

    fn any_format() -> impl Strategy<Value = DateFormat> {
        prop::sample::select(vec![
            "DD/MM/YYYY",
            "MM/DD/YYYY",
            "YYYY-MM-DD",
            "D.M.YYYY",
            "YYYYMMDD",
            "M/D/YYYY",
            "DD MM YYYY",
            "DD/MM/YYYY ",
            " DD/MM/YYYY",
            " YYYY-MM-DD\t",
            "0D/M/YYYY",
        ])
        .prop_filter_map("pattern compiles", |p| DateFormat::new(p).ok())
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_is_identity(d in any_date(), f in any_format()) {
            prop_assert_eq!(parse_date(&format_date(&d, &f), &f), Some(d));
        }

        #[test]
        fn prop_parse_is_idempotent(text in "[0-9/]{0,12}") {
            let format = dmy();
            prop_assert_eq!(parse_date(&text, &format), parse_date(&text, &format));
        }
    }
}
