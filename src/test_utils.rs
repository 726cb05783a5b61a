//! Shared constructors for unit tests.

use crate::{Date, RangeText, Time};

pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day).unwrap()
}

pub const fn time(hour: u16, minute: u16) -> Time {
    Time::new(hour, minute)
}

pub fn range_text(start: &str, end: &str) -> RangeText {
    RangeText::new(start, end)
}
