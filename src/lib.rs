//! Temporal logic behind date and time picker widgets.
//!
//! The crate holds two independent engines:
//!
//! - the **date engine** parses text against a token format such as
//!   `DD/MM/YYYY`, validates calendar dates, orders date ranges and answers
//!   selectability questions;
//! - the **time engine** parses `HH:MM` text, validates clock values, orders
//!   time ranges and generates evenly spaced suggestions for a typeahead.
//!
//! Everything here is a pure function of its arguments. A widget calls into it
//! on each keystroke with the current text and renders what comes back.
//!
//! # Validation asymmetry
//!
//! Dates and times are validated at different points, on purpose:
//!
//! - [`parse_date`] rejects out-of-range components (`31/02/2021` is `None`);
//! - [`parse_time`] accepts them (`"25:99"` is `Some`), and
//!   [`validate_time`] is the separate range check.
//!
//! Range ordering is asymmetric too: a date range may start and end on the same
//! day, a time range may not start and end at the same minute.

mod consts;
mod date;
mod format;
mod input;
mod prelude;
mod range;
mod suggest;
mod time;
mod types;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use date::{
    Date, Selectability, compare_dates, is_date_in_range, is_today_or_future_date,
};
pub use format::{DateFormat, Field, FormatError, Token, format_date, parse_date};
pub use input::{TypingState, mask_time_input};
pub use range::{
    DateRange, RangeError, RangeText, parse_date_range, validate_date_range_order,
};
pub use suggest::{
    Interval, SuggestionConfig, SuggestionError, SuggestionWindow, generate_time_list,
    parse_typing_hour, suggestion_window, time_steps,
};
pub use time::{
    Time, TimeError, TimeRange, parse_time, parse_time_range, validate_time,
    validate_time_range,
};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

/// Why a piece of text is not a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty date string")]
    EmptyInput,
    #[error("Expected {token} digits, found {found:?}")]
    ExpectedDigits { token: Token, found: String },
    #[error("Expected {expected:?}, found {found:?}")]
    UnexpectedText { expected: String, found: String },
    #[error("Unexpected trailing text: {0:?}")]
    TrailingInput(String),
    #[error("Invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(u16),
    #[error("Year {0} is outside the supported range 1-{max}", max = MAX_YEAR)]
    YearOutOfRange(i32),
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}
