//! Time-of-day suggestions for a time picker's dropdown.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_INTERVAL_MINUTES, DEFAULT_SUGGESTION_END, DEFAULT_SUGGESTION_START, MAX_HOUR,
    TIME_SEPARATOR,
};
use crate::prelude::*;
use crate::Time;

/// Step between two suggestions, in minutes. Always at least one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{_0}")]
#[serde(try_from = "u32", into = "u32")]
pub struct Interval(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionError {
    #[error("Suggestion interval must be a positive number of minutes")]
    NonPositiveInterval,
}

impl Interval {
    /// # Errors
    /// Returns `SuggestionError::NonPositiveInterval` for 0.
    pub fn new(minutes: u32) -> Result<Self, SuggestionError> {
        NonZeroU32::new(minutes)
            .map(Self)
            .ok_or(SuggestionError::NonPositiveInterval)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MINUTES).unwrap_or(Self(NonZeroU32::MIN))
    }
}

impl TryFrom<u32> for Interval {
    type Error = SuggestionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.get()
    }
}

/// Times from `start` to `end` inclusive, `interval` minutes apart.
///
/// Empty when `start` is after `end`; the walk never wraps past midnight.
pub fn time_steps(start: Time, end: Time, interval: Interval) -> impl Iterator<Item = Time> {
    let step = usize::try_from(interval.get()).unwrap_or(usize::MAX);
    (start.to_minutes()..=end.to_minutes())
        .step_by(step)
        .map_while(Time::from_minutes)
}

/// [`time_steps`] formatted as `HH:MM`.
pub fn generate_time_list(start: Time, end: Time, interval: Interval) -> Vec<String> {
    let list: Vec<String> = time_steps(start, end, interval)
        .map(|time| time.to_string())
        .collect();
    tracing::debug!(%start, %end, %interval, count = list.len(), "generated time list");
    list
}

/// The hour being typed, once the text starts with two digits forming 00-23.
pub fn parse_typing_hour(text: &str) -> Option<u8> {
    let hours = text.split(TIME_SEPARATOR).next()?;
    if hours.len() != 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = hours.parse::<u8>().ok()?;
    (u16::from(hour) <= MAX_HOUR).then_some(hour)
}

/// First and last time a suggestion list may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuggestionWindow {
    pub start: Time,
    pub end:   Time,
}

/// Narrows `start..=end` to the typed hour (`HH:00..=HH:59`) once a full hour
/// has been typed. Otherwise returns the configured bounds unchanged.
pub fn suggestion_window(text: &str, start: Time, end: Time) -> SuggestionWindow {
    match parse_typing_hour(text) {
        Some(hour) => {
            let hour = u16::from(hour);
            tracing::debug!(hour, "narrowing suggestions to typed hour");
            SuggestionWindow {
                start: Time::new(hour, 0),
                end:   Time::new(hour, 59),
            }
        }
        None => SuggestionWindow { start, end },
    }
}

/// What a time picker suggests and how many entries it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub start:           Time,
    pub end:             Time,
    pub interval:        Interval,
    /// Keep only the first entries of the list; `None` keeps them all.
    pub max_suggestions: Option<usize>,
}

impl Default for SuggestionConfig {
    /// 00:00 to 23:59 every 15 minutes, no cap.
    fn default() -> Self {
        let (start_hour, start_minute) = DEFAULT_SUGGESTION_START;
        let (end_hour, end_minute) = DEFAULT_SUGGESTION_END;
        Self {
            start:           Time::new(start_hour, start_minute),
            end:             Time::new(end_hour, end_minute),
            interval:        Interval::default(),
            max_suggestions: None,
        }
    }
}

impl SuggestionConfig {
    pub fn window(&self, text: &str) -> SuggestionWindow {
        suggestion_window(text, self.start, self.end)
    }

    /// Suggestions to show while `text` is in the input.
    ///
    /// The full list for the window is generated first and then cut to
    /// `max_suggestions`, so a cap keeps the earliest entries.
    pub fn suggestions(&self, text: &str) -> Vec<String> {
        let SuggestionWindow { start, end } = self.window(text);
        let mut list = generate_time_list(start, end, self.interval);
        if let Some(max) = self.max_suggestions {
            list.truncate(max);
        }
        list
    }
}
