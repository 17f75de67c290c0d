//! Extended absence deduction.
//!
//! Only absences lasting more than 30 consecutive days reduce tenure. The
//! gate is applied to the whole interval before it is clipped to the
//! service window, so a 45-day absence that only partly falls after the hire
//! date still deducts its overlapping days, while a 30-day absence never
//! deducts anything.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::AbsenceInterval;

/// Filters raw absence rows down to those that affect tenure.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::qualifying_absences;
/// use leave_engine::models::AbsenceInterval;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let absences = vec![
///     AbsenceInterval::new(d(1, 1), d(1, 30)).unwrap(),
///     AbsenceInterval::new(d(3, 1), d(4, 30)).unwrap(),
/// ];
///
/// let qualifying: Vec<_> = qualifying_absences(&absences).collect();
/// assert_eq!(qualifying.len(), 1);
/// assert_eq!(qualifying[0].start(), d(3, 1));
/// ```
pub fn qualifying_absences(
    absences: &[AbsenceInterval],
) -> impl Iterator<Item = &AbsenceInterval> + '_ {
    absences.iter().filter(|absence| absence.is_qualifying())
}

/// Sums the qualifying absence days inside `[hire_date, as_of]`.
///
/// Overlapping intervals are summed as given. Returns `0` when `as_of`
/// precedes the hire date.
pub fn total_deductible_days(
    hire_date: NaiveDate,
    absences: &[AbsenceInterval],
    as_of: NaiveDate,
) -> i64 {
    if as_of < hire_date {
        return 0;
    }

    let total: i64 = qualifying_absences(absences)
        .filter_map(|absence| absence.overlap_days(hire_date, as_of).ok())
        .sum();

    debug!(
        hire_date = %hire_date,
        as_of = %as_of,
        absences = absences.len(),
        deductible_days = total,
        "Computed deductible absence days"
    );

    total
}
