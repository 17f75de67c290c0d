//! Carryover eligibility.
//!
//! Unused paid days from one year may be used in the next year until the
//! policy cutoff, after which they are forfeited. This module only reports
//! eligibility; writing adjusted balances back is the caller's concern.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CarryoverPolicy;
use crate::error::EngineResult;
use crate::models::BalanceSummary;

use super::calendar::check_year_bounds;

/// Carryover from one year into the next, as of a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryoverStatus {
    /// The year the unused days come from.
    pub from_year: i32,
    /// The year the days roll into.
    pub into_year: i32,
    /// Unused prior-year paid days; `None` if the prior entitlement was
    /// not configured.
    pub eligible_days: Option<Decimal>,
    /// Last day the carried days may be used.
    pub expires_on: NaiveDate,
    /// True once the reference date is past `expires_on`.
    pub is_expired: bool,
    /// Carried days still usable on the reference date.
    pub available_days: Option<Decimal>,
}

/// Last day in `year` on which prior-year days may still be used.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::carryover_cutoff;
/// use leave_engine::config::CarryoverPolicy;
/// use chrono::NaiveDate;
///
/// let policy = CarryoverPolicy { expiry_month: 3, expiry_day: 31 };
/// assert_eq!(
///     carryover_cutoff(&policy, 2025).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
/// );
/// ```
pub fn carryover_cutoff(policy: &CarryoverPolicy, year: i32) -> EngineResult<NaiveDate> {
    check_year_bounds(year)?;
    policy.cutoff_for(year)
}

/// Returns true if carried days from `year - 1` may be used on `on`.
///
/// Only dates inside `year`, up to and including the cutoff, are eligible.
pub fn is_carryover_eligible(
    policy: &CarryoverPolicy,
    year: i32,
    on: NaiveDate,
) -> EngineResult<bool> {
    let cutoff = carryover_cutoff(policy, year)?;
    Ok(on.year() == year && on <= cutoff)
}

/// Derives the carryover from a prior year's balance.
///
/// Overdrawn balances carry nothing. After the cutoff the available amount
/// drops to zero.
pub fn compute_carryover(
    prior: &BalanceSummary,
    policy: &CarryoverPolicy,
    as_of: NaiveDate,
) -> EngineResult<CarryoverStatus> {
    let into_year = prior.year + 1;
    let expires_on = carryover_cutoff(policy, into_year)?;
    let is_expired = as_of > expires_on;

    let eligible_days = prior
        .remaining_days
        .map(|remaining| remaining.max(Decimal::ZERO));
    let available_days = eligible_days.map(|days| if is_expired { Decimal::ZERO } else { days });

    Ok(CarryoverStatus {
        from_year: prior.year,
        into_year,
        eligible_days,
        expires_on,
        is_expired,
        available_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditTrace, StatusCounts};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn policy() -> CarryoverPolicy {
        CarryoverPolicy {
            expiry_month: 3,
            expiry_day: 31,
        }
    }

    fn prior_year(remaining: Option<Decimal>) -> BalanceSummary {
        BalanceSummary {
            year: 2024,
            entitlement_days: remaining.map(|_| Decimal::from(15)),
            employment_year: Some(3),
            paid_used_days: Decimal::from(11),
            unpaid_used_days: Decimal::ZERO,
            remaining_days: remaining,
            counts_by_status: StatusCounts::default(),
            carryover_expires_on: make_date("2024-03-31"),
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_eligible_on_cutoff_day() {
        assert!(is_carryover_eligible(&policy(), 2025, make_date("2025-03-31")).unwrap());
    }

    #[test]
    fn test_not_eligible_day_after_cutoff() {
        assert!(!is_carryover_eligible(&policy(), 2025, make_date("2025-04-01")).unwrap());
    }

    #[test]
    fn test_not_eligible_outside_year() {
        assert!(!is_carryover_eligible(&policy(), 2025, make_date("2024-12-31")).unwrap());
    }

    #[test]
    fn test_cutoff_rejects_out_of_range_year() {
        assert!(carryover_cutoff(&policy(), 3000).is_err());
    }

    #[test]
    fn test_carryover_before_cutoff() {
        let status =
            compute_carryover(&prior_year(Some(Decimal::from(4))), &policy(), make_date("2025-02-10"))
                .unwrap();

        assert_eq!(status.from_year, 2024);
        assert_eq!(status.into_year, 2025);
        assert_eq!(status.eligible_days, Some(Decimal::from(4)));
        assert_eq!(status.expires_on, make_date("2025-03-31"));
        assert!(!status.is_expired);
        assert_eq!(status.available_days, Some(Decimal::from(4)));
    }

    #[test]
    fn test_carryover_forfeited_after_cutoff() {
        let status =
            compute_carryover(&prior_year(Some(Decimal::from(4))), &policy(), make_date("2025-04-01"))
                .unwrap();

        assert!(status.is_expired);
        assert_eq!(status.eligible_days, Some(Decimal::from(4)));
        assert_eq!(status.available_days, Some(Decimal::ZERO));
    }

    #[test]
    fn test_overdrawn_prior_year_carries_nothing() {
        let status =
            compute_carryover(&prior_year(Some(Decimal::from(-2))), &policy(), make_date("2025-01-15"))
                .unwrap();
        assert_eq!(status.eligible_days, Some(Decimal::ZERO));
    }

    #[test]
    fn test_unconfigured_prior_year_is_none() {
        let status =
            compute_carryover(&prior_year(None), &policy(), make_date("2025-01-15")).unwrap();
        assert_eq!(status.eligible_days, None);
        assert_eq!(status.available_days, None);
    }
}
