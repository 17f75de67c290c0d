//! Effective tenure calculation.
//!
//! Tenure is the calendar difference between a service start and a
//! reference date, expressed as years, months and days with month/day
//! borrowing over actual month lengths. Qualifying extended absences push
//! the service start forward by the number of absence days already elapsed,
//! so every downstream reading (anniversaries, employment year) sees the
//! absence-adjusted clock.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::AbsenceInterval;

use super::absence::total_deductible_days;
use super::calendar::days_in_month;

/// Elapsed service as of a reference date.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::TenureResult;
///
/// let tenure = TenureResult { years: 3, months: 0, days: 0 };
/// assert!(tenure.is_anniversary());
/// assert_eq!(tenure.to_string(), "3 years, 0 months, 0 days");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenureResult {
    /// Whole years of service.
    pub years: u32,
    /// Additional whole months (0-11).
    pub months: u32,
    /// Additional days (0-30).
    pub days: u32,
}

impl TenureResult {
    /// No service at all.
    pub const ZERO: TenureResult = TenureResult {
        years: 0,
        months: 0,
        days: 0,
    };

    /// Returns true if no service has elapsed.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns true on an exact anniversary of at least one year.
    pub fn is_anniversary(&self) -> bool {
        self.years >= 1 && self.months == 0 && self.days == 0
    }
}

impl fmt::Display for TenureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: u32) -> &'static str {
            if n == 1 { "" } else { "s" }
        }
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

/// Calendar difference from `from` to `to`, with cascading borrow.
///
/// A start day past the end of a shorter month is clamped to that month's
/// last day, so Jan 31 to Feb 28 is one month and a Feb 29 start reaches its
/// anniversary on Feb 28 in non-leap years. Returns zero if `to < from`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{raw_tenure, TenureResult};
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(
///     raw_tenure(hired, today),
///     TenureResult { years: 4, months: 1, days: 24 }
/// );
/// ```
pub fn raw_tenure(from: NaiveDate, to: NaiveDate) -> TenureResult {
    if to < from {
        return TenureResult::ZERO;
    }

    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;

    let anchor_day = from.day().min(days_in_month(to.year(), to.month()));
    let days = if to.day() >= anchor_day {
        to.day() - anchor_day
    } else {
        // Borrow the month preceding `to`.
        months -= 1;
        let (prev_year, prev_month) = if to.month() == 1 {
            (to.year() - 1, 12)
        } else {
            (to.year(), to.month() - 1)
        };
        days_in_month(prev_year, prev_month).saturating_sub(from.day()) + to.day()
    };

    if months < 0 {
        years -= 1;
        months += 12;
    }

    TenureResult {
        years: years.max(0) as u32,
        months: months as u32,
        days,
    }
}

/// The hire date moved forward by the qualifying absence days elapsed by
/// `as_of`.
///
/// Returns `None` when there is no hire date, or when the shifted date is
/// not representable.
pub fn effective_service_start(
    hire_date: Option<NaiveDate>,
    absences: &[AbsenceInterval],
    as_of: NaiveDate,
) -> Option<NaiveDate> {
    let hire_date = hire_date?;
    let deduct_days = total_deductible_days(hire_date, absences, as_of);
    let start = hire_date.checked_add_days(Days::new(deduct_days.max(0) as u64));

    debug!(
        hire_date = %hire_date,
        as_of = %as_of,
        deduct_days,
        effective_start = ?start,
        "Resolved effective service start"
    );

    start
}

/// Effective tenure as of `as_of`, with extended absences excluded.
///
/// # Behavior
///
/// - No hire date: zero tenure, never an error.
/// - No qualifying absences: identical to [`raw_tenure`].
/// - Deductions that consume all elapsed time clamp to zero.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{effective_tenure, TenureResult};
/// use leave_engine::models::AbsenceInterval;
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let absences = vec![AbsenceInterval::new(d(2022, 1, 1), d(2022, 1, 31)).unwrap()];
///
/// let tenure = effective_tenure(Some(d(2020, 3, 1)), &absences, d(2024, 3, 1));
/// assert_eq!(tenure, TenureResult { years: 3, months: 11, days: 0 });
///
/// assert_eq!(effective_tenure(None, &absences, d(2024, 3, 1)), TenureResult::ZERO);
/// ```
pub fn effective_tenure(
    hire_date: Option<NaiveDate>,
    absences: &[AbsenceInterval],
    as_of: NaiveDate,
) -> TenureResult {
    match effective_service_start(hire_date, absences, as_of) {
        Some(start) => raw_tenure(start, as_of),
        None => TenureResult::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn tenure(years: u32, months: u32, days: u32) -> TenureResult {
        TenureResult {
            years,
            months,
            days,
        }
    }

    fn interval(start: &str, end: &str) -> AbsenceInterval {
        AbsenceInterval::new(make_date(start), make_date(end)).unwrap()
    }

    // ==========================================================================
    // Raw calendar difference
    // ==========================================================================
    #[test]
    fn test_raw_same_day_is_zero() {
        let d = make_date("2024-03-15");
        assert_eq!(raw_tenure(d, d), TenureResult::ZERO);
    }

    #[test]
    fn test_raw_exact_years() {
        assert_eq!(
            raw_tenure(make_date("2020-03-15"), make_date("2024-03-15")),
            tenure(4, 0, 0)
        );
    }

    #[test]
    fn test_raw_day_before_anniversary() {
        // Borrow February 2024 (29 days): 29 - 15 + 14 = 28
        assert_eq!(
            raw_tenure(make_date("2020-03-15"), make_date("2024-03-14")),
            tenure(3, 11, 28)
        );
    }

    #[test]
    fn test_raw_borrow_uses_actual_month_length() {
        // Borrow February 2023 (28 days): 28 - 15 + 10 = 23
        assert_eq!(
            raw_tenure(make_date("2023-01-15"), make_date("2023-03-10")),
            tenure(0, 1, 23)
        );
        // Borrow February 2024 (29 days): 29 - 15 + 10 = 24
        assert_eq!(
            raw_tenure(make_date("2024-01-15"), make_date("2024-03-10")),
            tenure(0, 1, 24)
        );
    }

    #[test]
    fn test_raw_month_end_start_never_goes_negative() {
        assert_eq!(
            raw_tenure(make_date("2023-01-31"), make_date("2023-03-01")),
            tenure(0, 1, 1)
        );
        assert_eq!(
            raw_tenure(make_date("2023-01-31"), make_date("2023-02-28")),
            tenure(0, 1, 0)
        );
        assert_eq!(
            raw_tenure(make_date("2023-01-31"), make_date("2023-02-27")),
            tenure(0, 0, 27)
        );
    }

    #[test]
    fn test_raw_leap_day_hire_anniversary_in_non_leap_year() {
        assert_eq!(
            raw_tenure(make_date("2020-02-29"), make_date("2021-02-28")),
            tenure(1, 0, 0)
        );
        assert_eq!(
            raw_tenure(make_date("2020-02-29"), make_date("2024-02-29")),
            tenure(4, 0, 0)
        );
        assert_eq!(
            raw_tenure(make_date("2020-02-29"), make_date("2024-02-28")),
            tenure(3, 11, 30)
        );
    }

    #[test]
    fn test_raw_borrow_across_year_boundary() {
        // Borrow December 2023 (31 days): 31 - 20 + 5 = 16
        assert_eq!(
            raw_tenure(make_date("2022-12-20"), make_date("2024-01-05")),
            tenure(1, 0, 16)
        );
    }

    #[test]
    fn test_raw_reference_before_start_is_zero() {
        assert_eq!(
            raw_tenure(make_date("2024-03-15"), make_date("2024-03-14")),
            TenureResult::ZERO
        );
    }

    // ==========================================================================
    // Effective tenure
    // ==========================================================================
    #[test]
    fn test_missing_hire_date_is_zero() {
        let absences = vec![interval("2022-01-01", "2022-12-31")];
        assert_eq!(
            effective_tenure(None, &absences, make_date("2024-01-01")),
            TenureResult::ZERO
        );
    }

    #[test]
    fn test_no_absences_matches_raw() {
        let hire = make_date("2019-07-04");
        let as_of = make_date("2024-10-18");
        assert_eq!(
            effective_tenure(Some(hire), &[], as_of),
            raw_tenure(hire, as_of)
        );
    }

    #[test]
    fn test_short_absence_has_no_effect() {
        let hire = make_date("2019-07-04");
        let as_of = make_date("2024-10-18");
        let absences = vec![interval("2021-05-01", "2021-05-30")];
        assert_eq!(
            effective_tenure(Some(hire), &absences, as_of),
            raw_tenure(hire, as_of)
        );
    }

    #[test]
    fn test_qualifying_absence_pushes_anniversary() {
        // 31-day absence: four years on 2024-03-01 becomes 3y 11m
        let absences = vec![interval("2022-01-01", "2022-01-31")];
        let result = effective_tenure(
            Some(make_date("2020-03-01")),
            &absences,
            make_date("2024-03-01"),
        );
        assert_eq!(result, tenure(3, 11, 0));

        // and the effective anniversary lands 31 days later
        let shifted = effective_tenure(
            Some(make_date("2020-03-01")),
            &absences,
            make_date("2024-04-01"),
        );
        assert_eq!(shifted, tenure(4, 0, 0));
    }

    #[test]
    fn test_deduction_larger_than_service_clamps_to_zero() {
        // Absence covers every day of service, so the start moves past as_of
        let absences = vec![interval("2023-12-01", "2024-12-31")];
        let result = effective_tenure(
            Some(make_date("2024-01-01")),
            &absences,
            make_date("2024-06-01"),
        );
        assert_eq!(result, TenureResult::ZERO);
    }

    #[test]
    fn test_effective_service_start_shifts_by_deducted_days() {
        let absences = vec![interval("2022-01-01", "2022-01-31")];
        let start = effective_service_start(
            Some(make_date("2020-03-01")),
            &absences,
            make_date("2024-03-01"),
        );
        assert_eq!(start, Some(make_date("2020-04-01")));
    }

    #[test]
    fn test_effective_tenure_is_idempotent() {
        let absences = vec![interval("2022-01-01", "2022-03-31")];
        let hire = Some(make_date("2018-11-30"));
        let as_of = make_date("2024-10-18");
        assert_eq!(
            effective_tenure(hire, &absences, as_of),
            effective_tenure(hire, &absences, as_of)
        );
    }

    #[test]
    fn test_display_pluralization() {
        assert_eq!(tenure(1, 1, 1).to_string(), "1 year, 1 month, 1 day");
        assert_eq!(tenure(2, 0, 5).to_string(), "2 years, 0 months, 5 days");
    }

    #[test]
    fn test_tenure_serialization() {
        let json = serde_json::to_string(&tenure(3, 2, 1)).unwrap();
        assert_eq!(json, r#"{"years":3,"months":2,"days":1}"#);
    }
}
