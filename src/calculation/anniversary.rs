//! Work anniversary resolution.
//!
//! Anniversaries are read from the effective (absence-adjusted) service
//! start, so an employee returning from a long sabbatical has their
//! anniversary pushed out by the time away.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceInterval, Employee};

use super::calendar::days_in_month;
use super::tenure::{effective_service_start, effective_tenure};

/// An upcoming or recent work anniversary within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnniversaryEntry {
    /// The employee's identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The effective anniversary date in the reference year.
    pub anniversary_date: NaiveDate,
    /// Years of effective service completed on that date (at least 1).
    pub years: u32,
    /// Days from the reference date to the anniversary; negative if past.
    pub days_until: i64,
}

/// Returns true if `today` is an effective work anniversary.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_anniversary;
/// use chrono::NaiveDate;
///
/// let hired = Some(NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
/// assert!(is_anniversary(hired, &[], NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
/// assert!(!is_anniversary(hired, &[], NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
/// assert!(!is_anniversary(hired, &[], NaiveDate::from_ymd_opt(2020, 3, 15).unwrap()));
/// ```
pub fn is_anniversary(
    hire_date: Option<NaiveDate>,
    absences: &[AbsenceInterval],
    today: NaiveDate,
) -> bool {
    effective_tenure(hire_date, absences, today).is_anniversary()
}

/// The anniversary of `service_start` falling in `year`.
///
/// A Feb 29 start falls on Feb 28 in non-leap years.
pub fn anniversary_in_year(service_start: NaiveDate, year: i32) -> Option<NaiveDate> {
    let day = service_start
        .day()
        .min(days_in_month(year, service_start.month()));
    NaiveDate::from_ymd_opt(year, service_start.month(), day)
}

/// Lists every active employee whose effective anniversary in `today`'s
/// year falls in `month`.
///
/// # Behavior
///
/// - Inactive employees and employees without a hire date are skipped.
/// - Employees who would complete fewer than one year are excluded.
/// - Entries are ordered by day of month; ties keep input order.
///
/// # Errors
///
/// Returns `DateParse` if `month` is not 1-12.
pub fn month_anniversaries(
    employees: &[Employee],
    month: u32,
    today: NaiveDate,
) -> EngineResult<Vec<AnniversaryEntry>> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::DateParse {
            input: month.to_string(),
            message: "month must be between 1 and 12".to_string(),
        });
    }

    let mut entries: Vec<AnniversaryEntry> = employees
        .iter()
        .filter(|employee| employee.has_tenure())
        .filter_map(|employee| {
            let start =
                effective_service_start(employee.hire_date, &employee.extended_absences, today)?;
            let anniversary_date = anniversary_in_year(start, today.year())?;
            if anniversary_date.month() != month {
                return None;
            }

            let years = today.year() - start.year();
            if years < 1 {
                return None;
            }

            Some(AnniversaryEntry {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                anniversary_date,
                years: years as u32,
                days_until: (anniversary_date - today).num_days(),
            })
        })
        .collect();

    // Vec::sort_by_key is stable, so equal days keep input order.
    entries.sort_by_key(|entry| entry.anniversary_date.day());

    debug!(
        month,
        today = %today,
        candidates = employees.len(),
        matches = entries.len(),
        "Resolved monthly anniversaries"
    );

    Ok(entries)
}
