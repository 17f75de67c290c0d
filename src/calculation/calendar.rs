//! Calendar utilities.
//!
//! This module provides date parsing with the engine's year bounds, weekday
//! classification, inclusive day spans and the working-day count used for
//! leave consumption. Public holidays are not modelled.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Earliest year the engine accepts.
pub const MIN_YEAR: i32 = 1900;

/// Latest year the engine accepts.
pub const MAX_YEAR: i32 = 2999;

/// Parses an ISO `YYYY-MM-DD` date and checks the year bounds.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_date("2024-02-29").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
/// );
/// assert!(parse_date("2023-02-29").is_err());
/// assert!(parse_date("1899-12-31").is_err());
/// ```
pub fn parse_date(input: &str) -> EngineResult<NaiveDate> {
    let trimmed = input.trim();
    let date =
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| EngineError::DateParse {
            input: trimmed.to_string(),
            message: e.to_string(),
        })?;
    check_date_bounds(date)
}

/// Checks that a date lies within `[MIN_YEAR, MAX_YEAR]`.
pub fn check_date_bounds(date: NaiveDate) -> EngineResult<NaiveDate> {
    check_year_bounds(date.year())?;
    Ok(date)
}

/// Checks that a year lies within `[MIN_YEAR, MAX_YEAR]`.
pub fn check_year_bounds(year: i32) -> EngineResult<i32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(EngineError::DateParse {
            input: year.to_string(),
            message: format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR),
        });
    }
    Ok(year)
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month, accounting for leap years.
///
/// Returns `0` for a month outside 1-12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// An inclusive, restartable range of calendar days.
///
/// Iterating a `DaySpan` never consumes it; each call to `iter` starts over
/// from the first day.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::day_span;
/// use chrono::NaiveDate;
///
/// let span = day_span(
///     NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(span.len(), 4);
/// assert_eq!(span.iter().count(), 4);
/// assert_eq!(span.iter().count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaySpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DaySpan {
    /// First day of the span.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the span (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the span.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// A span always holds at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the days of the span from the start.
    pub fn iter(&self) -> DaySpanIter {
        DaySpanIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DaySpan {
    type Item = NaiveDate;
    type IntoIter = DaySpanIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DaySpan {
    type Item = NaiveDate;
    type IntoIter = DaySpanIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the days of a [`DaySpan`].
#[derive(Debug, Clone)]
pub struct DaySpanIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DaySpanIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|next| ((self.end - next).num_days() + 1) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DaySpanIter {}

/// Builds the inclusive span `[start, end]`.
///
/// Fails with `InvalidRange` if `start > end`.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> EngineResult<DaySpan> {
    if start > end {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(DaySpan { start, end })
}

/// Counts the working days a leave request consumes.
///
/// # Behavior
///
/// - A half-day request is always `0.5`, whatever its range.
/// - A request with no end date, or ending on its start date, is `1`.
/// - Otherwise, the number of Monday-Friday dates in `[start, end]`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::count_working_days;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mon = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let fri = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
///
/// assert_eq!(count_working_days(mon, Some(fri), false).unwrap(), Decimal::from(5));
/// assert_eq!(count_working_days(mon, None, true).unwrap(), Decimal::new(5, 1));
/// ```
pub fn count_working_days(
    start: NaiveDate,
    end: Option<NaiveDate>,
    is_half_day: bool,
) -> EngineResult<Decimal> {
    if is_half_day {
        return Ok(Decimal::new(5, 1));
    }

    let end = match end {
        Some(end) if end != start => end,
        _ => return Ok(Decimal::ONE),
    };

    let span = day_span(start, end)?;
    let weekdays = span.iter().filter(|date| !is_weekend(*date)).count();
    Ok(Decimal::from(weekdays as u64))
}

/// Whole years elapsed from `from` to `to`.
///
/// The year difference is reduced by one if the month/day anniversary has
/// not yet been reached in `to`'s year.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::years_between;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
/// assert_eq!(years_between(hired, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()), 3);
/// assert_eq!(years_between(hired, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), 4);
/// ```
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}
