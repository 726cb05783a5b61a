//! Clock times as typed into a time picker.
//!
//! Parsing and validation are separate steps here. [`parse_time`] only checks
//! that the text holds two numbers; [`validate_time`] checks they form a real
//! time of day. `"25:99"` parses, and then fails validation.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HOUR, MAX_MINUTE, MINUTES_PER_HOUR, TIME_SEPARATOR};
use crate::prelude::*;
use crate::RangeText;

/// An hour/minute pair, not necessarily a valid time of day.
///
/// Ordered by minutes since midnight, so `01:60` sorts right before `02:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{hour:02}:{minute:02}")]
pub struct Time {
    hour:   u16,
    minute: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    Malformed(String),
    #[error("Invalid time {hour:02}:{minute:02} (must be 00:00-{max_hour}:{max_minute})", max_hour = MAX_HOUR, max_minute = MAX_MINUTE)]
    OutOfRange { hour: u16, minute: u16 },
}

impl Time {
    /// Builds a time without range checks.
    pub const fn new(hour: u16, minute: u16) -> Self {
        Self { hour, minute }
    }

    /// Builds a time that is a valid time of day.
    ///
    /// # Errors
    /// Returns `TimeError::OutOfRange` if hour > 23 or minute > 59.
    pub fn checked(hour: u16, minute: u16) -> Result<Self, TimeError> {
        let time = Self::new(hour, minute);
        if time.is_valid() {
            Ok(time)
        } else {
            Err(TimeError::OutOfRange { hour, minute })
        }
    }

    pub const fn hour(&self) -> u16 {
        self.hour
    }

    pub const fn minute(&self) -> u16 {
        self.minute
    }

    pub const fn is_valid(&self) -> bool {
        self.hour <= MAX_HOUR && self.minute <= MAX_MINUTE
    }

    pub const fn to_minutes(&self) -> u32 {
        self.hour as u32 * MINUTES_PER_HOUR + self.minute as u32
    }

    /// Inverse of [`Time::to_minutes`] for in-range values. `None` when the
    /// hour would not fit.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        let hour = u16::try_from(minutes / MINUTES_PER_HOUR).ok()?;
        let minute = u16::try_from(minutes % MINUTES_PER_HOUR).ok()?;
        Some(Self::new(hour, minute))
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal minute counts only happen for out-of-range values.
        self.to_minutes()
            .cmp(&other.to_minutes())
            .then(self.hour.cmp(&other.hour))
    }
}

impl FromStr for Time {
    type Err = TimeError;

    /// Strict parse: the text must also be a valid time of day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = parse_time(s).ok_or_else(|| TimeError::Malformed(s.to_owned()))?;
        Self::checked(time.hour, time.minute)
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_number(part: &str) -> Option<u16> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Splits `text` on `:` and reads hour and minute from the first two parts.
///
/// `None` if either part is missing or not a number. An empty part (`"12:"`,
/// `":30"`) counts as missing rather than as zero. Anything after the minute
/// part is ignored. Values are not range-checked, see [`validate_time`], but
/// each must fit in a `u16`: `"70000:00"` is `None`.
pub fn parse_time(text: &str) -> Option<Time> {
    let mut parts = text.split(TIME_SEPARATOR);
    let hour = parts.next().and_then(parse_number);
    let minute = parts.next().and_then(parse_number);

    match (hour, minute) {
        (Some(hour), Some(minute)) => Some(Time::new(hour, minute)),
        _ => {
            tracing::trace!(text, "rejected time text");
            None
        }
    }
}

/// `true` iff hour is 0-23 and minute is 0-59.
pub fn validate_time(time: &Time) -> bool {
    time.is_valid()
}

/// A time range as typed; either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeRange {
    pub start: Option<Time>,
    pub end:   Option<Time>,
}

impl TimeRange {
    /// `true` if a side is missing, otherwise start must be strictly before end.
    /// Unlike date ranges, an empty range (start == end) is rejected.
    pub fn is_valid(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start.to_minutes() < end.to_minutes(),
            _ => true,
        }
    }
}

/// Parses each side independently. Empty or absent text becomes `None`.
pub fn parse_time_range(text: &RangeText) -> TimeRange {
    TimeRange {
        start: text.start().and_then(parse_time),
        end:   text.end().and_then(parse_time),
    }
}

pub fn validate_time_range(range: &TimeRange) -> bool {
    range.is_valid()
}
