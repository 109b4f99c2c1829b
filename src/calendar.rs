//! Calendar arithmetic for archive dates.
//!
//! Publication archives are addressed as `/archive/{year}/{month}/{day}`, but
//! the scraper samples days as plain day-of-year integers. This module bridges
//! the two:
//!
//! - [`is_leap`]: Gregorian leap-year predicate
//! - [`convert_day`]: day-of-year to [`CalendarDate`]
//! - [`day_of_year`]: the inverse of [`convert_day`]
//! - [`select_days`]: random day sample for a target year

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::index;
use thiserror::Error;
use tracing::debug;

/// Errors produced when a day or date does not exist in the requested year.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("day-of-year {day} is out of range for {year} (expected 1..={max})")]
    DayOutOfRange { day: u32, year: i32, max: u32 },

    #[error("{year}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A month/day pair within an implied year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    /// Month of the year, 1 through 12.
    pub month: u32,
    /// Day of the month, 1 through 31.
    pub day: u32,
}

/// Determine whether `year` is a Gregorian leap year.
///
/// A year is a leap year when it is divisible by 4, unless it is also
/// divisible by 100 and not by 400. Total over all integers, including
/// negative (proleptic) years.
///
/// # Examples
///
/// ```ignore
/// assert!(is_leap(2000));
/// assert!(!is_leap(1900));
/// ```
pub fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Lengths of the twelve months of `year`, January first.
pub fn month_lengths(year: i32) -> [u32; 12] {
    let february = if is_leap(year) { 29 } else { 28 };
    [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
}

/// Number of days in `year`: 365, or 366 in leap years.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap(year) { 366 } else { 365 }
}

/// Convert a day-of-year into its month and day-of-month.
///
/// Walks the month-length table, subtracting each month in turn until the
/// remaining count fits inside the current month.
///
/// # Errors
///
/// Returns [`CalendarError::DayOutOfRange`] when `day` is zero or larger than
/// [`days_in_year`]. Out-of-range values are rejected rather than clamped.
pub fn convert_day(day: u32, year: i32) -> Result<CalendarDate, CalendarError> {
    let max = days_in_year(year);
    if day == 0 || day > max {
        return Err(CalendarError::DayOutOfRange { day, year, max });
    }

    let mut remaining = day;
    for (index, length) in month_lengths(year).into_iter().enumerate() {
        if remaining <= length {
            return Ok(CalendarDate {
                month: index as u32 + 1,
                day: remaining,
            });
        }
        remaining -= length;
    }

    // The range check above guarantees the loop returns.
    Err(CalendarError::DayOutOfRange { day, year, max })
}

/// Re-sum the month-length table to recover the day-of-year of a date.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] when the month or day does not
/// exist in `year` (for example February 29th in a common year).
pub fn day_of_year(month: u32, day: u32, year: i32) -> Result<u32, CalendarError> {
    let lengths = month_lengths(year);
    let invalid = CalendarError::InvalidDate { year, month, day };

    if !(1..=12).contains(&month) {
        return Err(invalid);
    }
    let month_index = (month - 1) as usize;
    if day == 0 || day > lengths[month_index] {
        return Err(invalid);
    }

    Ok(lengths[..month_index].iter().sum::<u32>() + day)
}

/// Convert a day-of-year straight into a [`NaiveDate`].
pub fn to_date(day: u32, year: i32) -> Result<NaiveDate, CalendarError> {
    let date = convert_day(day, year)?;
    NaiveDate::from_ymd_opt(year, date.month, date.day).ok_or(CalendarError::InvalidDate {
        year,
        month: date.month,
        day: date.day,
    })
}

/// Draw `count` distinct days-of-year for `year`, without replacement.
///
/// The count is capped at [`days_in_year`], so asking for more days than the
/// year has returns every day once. The order of the returned days is the
/// sampling order, not calendar order.
pub fn select_days<R: Rng + ?Sized>(rng: &mut R, year: i32, count: usize) -> Vec<u32> {
    let total = days_in_year(year) as usize;
    let amount = count.min(total);
    let days: Vec<u32> = index::sample(rng, total, amount)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect();
    debug!(year, requested = count, selected = days.len(), "Selected archive days");
    days
}
