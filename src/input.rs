//! Keystroke-level helpers for a time input.

use crate::consts::{
    MAX_HOUR, TIME_INPUT_HOUR_DIGITS, TIME_INPUT_MAX_DIGITS, TIME_SEPARATOR,
};
use crate::{Time, parse_time};

/// Reformats raw input into the `HH:MM` mask.
///
/// Keeps at most four ASCII digits and inserts `:` after the hour digits once
/// a minute digit follows, so `"1230"` becomes `"12:30"` and `"12"` stays
/// `"12"`.
pub fn mask_time_input(raw: &str) -> String {
    let mut masked = String::with_capacity(TIME_INPUT_MAX_DIGITS + 1);
    for (i, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(TIME_INPUT_MAX_DIGITS)
        .enumerate()
    {
        if i == TIME_INPUT_HOUR_DIGITS {
            masked.push(TIME_SEPARATOR);
        }
        masked.push(digit);
    }
    masked
}

/// Where a time input stands, derived from its current text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypingState {
    /// Nothing typed.
    Empty,
    /// One or two hour digits, possibly followed by `:`.
    TypingHour,
    /// Hour done, one minute digit so far.
    TypingMinute,
    /// A complete, valid time of day.
    Valid(Time),
    /// Text that cannot become a valid time by typing more.
    Invalid,
}

impl TypingState {
    pub fn of(text: &str) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }

        let (hours, minutes) = match text.split_once(TIME_SEPARATOR) {
            Some((hours, minutes)) => (hours, Some(minutes)),
            None => (text, None),
        };
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

        if hours.is_empty()
            || hours.len() > TIME_INPUT_HOUR_DIGITS
            || !digits(hours)
            || minutes.is_some_and(|m| !digits(m))
        {
            return Self::Invalid;
        }
        if hours.len() == TIME_INPUT_HOUR_DIGITS && hours.parse::<u16>().is_ok_and(|h| h > MAX_HOUR) {
            return Self::Invalid;
        }

        match minutes.map(str::len) {
            None | Some(0) => Self::TypingHour,
            Some(1) if minutes.is_some_and(|m| m <= "5") => Self::TypingMinute,
            Some(2) => parse_time(text)
                .filter(Time::is_valid)
                .map_or(Self::Invalid, Self::Valid),
            Some(_) => Self::Invalid,
        }
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The parsed time, for the `Valid` state.
    pub const fn time(&self) -> Option<Time> {
        match *self {
            Self::Valid(time) => Some(time),
            Self::Empty | Self::TypingHour | Self::TypingMinute | Self::Invalid => None,
        }
    }
}
