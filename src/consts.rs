/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Pattern used when a picker does not supply its own date format
pub const DEFAULT_DATE_FORMAT: &str = "DD/MM/YYYY";
/// Pattern used by `Date`'s `Display` and `FromStr`
pub const ISO_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Separator between hour and minute in typed time text
pub const TIME_SEPARATOR: char = ':';
/// Largest valid hour on a 24-hour clock
pub const MAX_HOUR: u16 = 23;
/// Largest valid minute
pub const MAX_MINUTE: u16 = 59;
/// Minutes in one hour
pub const MINUTES_PER_HOUR: u32 = 60;

/// Digits accepted by the time input mask (`HHMM`)
pub const TIME_INPUT_MAX_DIGITS: usize = 4;
/// Number of hour digits before the mask inserts `TIME_SEPARATOR`
pub const TIME_INPUT_HOUR_DIGITS: usize = 2;

/// Default first suggestion (00:00)
pub const DEFAULT_SUGGESTION_START: (u16, u16) = (0, 0);
/// Default last suggestion bound (23:59)
pub const DEFAULT_SUGGESTION_END: (u16, u16) = (23, 59);
/// Default spacing between suggestions, in minutes
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15;
