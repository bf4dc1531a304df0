//! Day-ordinal calendar codec.
//!
//! Dates are stored as a 1-indexed position inside a fixed 366-day reference
//! leap year (February always has 29 days). The reference year is a storage
//! index, not a real year: it gives every possible calendar date, including
//! February 29, a stable integer key regardless of which historical year a
//! fact belongs to. Day-ordinal 60 is always February 29, 61 is always
//! March 1, 366 is always December 31.
//!
//! Both conversions are pure functions over compile-time constant tables and
//! are safe to call from any number of threads.

mod consts;
mod error;

pub use consts::{DAYS_IN_YEAR, MONTH_LENGTHS, MONTH_NAMES, MONTH_STARTS};
pub use error::CalendarError;

use consts::{DECEMBER, JANUARY};
use serde::Serialize;
use std::fmt;

/// A month/day pair inside the reference leap year. Carries no year: the year
/// attached to a fact is stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDate {
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// Converts a month/day pair to its day-ordinal in [1, 366].
///
/// # Errors
/// `MonthOutOfRange` when `month` is outside [1, 12], then `DayOutOfRange`
/// when `day` is outside the month's length. Month is checked first.
pub fn to_ordinal(month: i64, day: i64) -> Result<u16, CalendarError> {
    if month < i64::from(JANUARY) || month > i64::from(DECEMBER) {
        return Err(CalendarError::MonthOutOfRange(month));
    }

    let month_length = i64::from(MONTH_LENGTHS[month as usize]);
    if day < 1 || day > month_length {
        return Err(CalendarError::DayOutOfRange(day));
    }

    // Ordinals are 1-indexed, so the 1st of the month is the start itself.
    Ok(MONTH_STARTS[month as usize] + day as u16 - 1)
}

/// Converts a day-ordinal in [1, 366] back to its month/day pair.
///
/// The month is the one with the greatest first-day ordinal that does not
/// exceed `ordinal`; the day is the offset past that first day.
///
/// # Errors
/// `OrdinalOutOfRange` when `ordinal` is outside [1, 366].
pub fn from_ordinal(ordinal: i64) -> Result<CalendarDate, CalendarError> {
    if ordinal < 1 || ordinal > i64::from(DAYS_IN_YEAR) {
        return Err(CalendarError::OrdinalOutOfRange(ordinal));
    }
    let ordinal = ordinal as u16;

    let mut month = DECEMBER as usize;
    while MONTH_STARTS[month] > ordinal {
        month -= 1;
    }

    Ok(CalendarDate {
        month: month as u8,
        day: (ordinal - MONTH_STARTS[month] + 1) as u8,
    })
}

/// `to_ordinal` over raw numeric input, rejecting non-integral values.
///
/// Both arguments are type-checked together before any range check, so a
/// fractional month takes precedence over any day problem.
///
/// # Errors
/// `InvalidMonthDayTypes` when either argument is not an integral number,
/// otherwise whatever [`to_ordinal`] returns.
pub fn to_ordinal_checked(month: f64, day: f64) -> Result<u16, CalendarError> {
    match (as_integer(month), as_integer(day)) {
        (Some(month), Some(day)) => to_ordinal(month, day),
        _ => Err(CalendarError::InvalidMonthDayTypes),
    }
}

/// `from_ordinal` over raw numeric input, rejecting non-integral values.
///
/// # Errors
/// `InvalidOrdinalType` when `ordinal` is not an integral number, otherwise
/// whatever [`from_ordinal`] returns.
pub fn from_ordinal_checked(ordinal: f64) -> Result<CalendarDate, CalendarError> {
    match as_integer(ordinal) {
        Some(ordinal) => from_ordinal(ordinal),
        None => Err(CalendarError::InvalidOrdinalType),
    }
}

fn as_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// English name of a month in [1, 12].
pub fn month_name(month: u8) -> &'static str {
    debug_assert!(month >= JANUARY && month <= DECEMBER);

    MONTH_NAMES[month as usize - 1]
}

/// Formats a number with its English ordinal suffix: 1 -> "1st", 22 -> "22nd",
/// 13 -> "13th".
pub fn with_ordinal_suffix(number: u16) -> String {
    // The teens are all "th", including 11, 12 and 13.
    let suffix = match (number % 100, number % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };

    format!("{number}{suffix}")
}
