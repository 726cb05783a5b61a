use std::cmp::Ordering;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::{Day, Month, Year};
use crate::{DateFormat, ParseError};

/// A calendar date with no time component.
///
/// Ordered by year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
}

impl Date {
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range,
    /// checking year, then month, then day against that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// The local calendar date.
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if the system clock is set outside
    /// years 1-9999.
    pub fn today() -> Result<Self, ParseError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::iso().parse(s)
    }
}

impl TryFrom<chrono::NaiveDate> for Date {
    type Error = ParseError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(value: chrono::NaiveDate) -> Result<Self, Self::Error> {
        let year =
            u16::try_from(value.year()).map_err(|_| ParseError::YearOutOfRange(value.year()))?;
        // chrono keeps month in 1..=12 and day in 1..=31
        Self::new(year, value.month() as u8, value.day() as u8).map_err(|err| match err {
            ParseError::InvalidYear(_) => ParseError::YearOutOfRange(value.year()),
            other => other,
        })
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `Less` when `a` is before `b`, `Greater` when after.
pub fn compare_dates(a: &Date, b: &Date) -> Ordering {
    a.cmp(b)
}

/// `true` when `date` is `today` or later. `today` comes from the caller so the
/// answer does not depend on the clock.
pub fn is_today_or_future_date(date: &Date, today: &Date) -> bool {
    date >= today
}

/// Predicate accepting dates in `lower..=upper`.
///
/// Accepts nothing when `lower > upper`.
pub fn is_date_in_range(lower: Date, upper: Date) -> impl Fn(&Date) -> bool {
    move |date| lower <= *date && *date <= upper
}

/// Which calendar days a picker lets the user select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selectability {
    #[default]
    Any,
    TodayOrFuture { today: Date },
    Between { lower: Date, upper: Date },
}

impl Selectability {
    pub fn allows(&self, date: &Date) -> bool {
        match *self {
            Self::Any => true,
            Self::TodayOrFuture { today } => is_today_or_future_date(date, &today),
            Self::Between { lower, upper } => is_date_in_range(lower, upper)(date),
        }
    }
}
