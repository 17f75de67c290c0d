//! Annual entitlement resolution.
//!
//! This module maps an employment year onto the sparse accrual rule table.
//! Entitlement is a step function evaluated once per year at year end; there
//! is no mid-year proration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AccrualRuleTable;
use crate::models::{AbsenceInterval, AuditStep};

use super::calendar::years_between;
use super::tenure::effective_service_start;

/// How an employment year was matched to a configured tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMatch {
    /// The employment year is itself a configured key.
    Exact,
    /// The highest configured key below the employment year was used.
    Floor,
    /// The employment year is below every key; the lowest tier was used.
    LowestTier,
    /// The rule table is empty.
    NotConfigured,
}

impl std::fmt::Display for TierMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierMatch::Exact => write!(f, "exact"),
            TierMatch::Floor => write!(f, "floor"),
            TierMatch::LowestTier => write!(f, "lowest_tier"),
            TierMatch::NotConfigured => write!(f, "not_configured"),
        }
    }
}

/// Finds the tier that governs `employment_year`.
///
/// Returns the match kind and, when configured, the `(tier_year, quota)`
/// pair that was selected.
pub fn resolve_tier(
    rules: &AccrualRuleTable,
    employment_year: u32,
) -> (TierMatch, Option<(u32, u32)>) {
    if let Some(quota) = rules.get(employment_year) {
        return (TierMatch::Exact, Some((employment_year, quota)));
    }
    if let Some(tier) = rules.floor(employment_year) {
        return (TierMatch::Floor, Some(tier));
    }
    match rules.first() {
        Some(tier) => (TierMatch::LowestTier, Some(tier)),
        None => (TierMatch::NotConfigured, None),
    }
}

/// Resolves the annual paid quota for an employment year.
///
/// Exact matches win; otherwise the highest tier at or below the year
/// applies; a year below every tier falls back to the lowest tier. An empty
/// table yields `None`, which is distinct from a configured `0`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::resolve_annual_quota;
/// use leave_engine::config::AccrualRuleTable;
///
/// let rules: AccrualRuleTable = [(1, 12), (2, 13), (3, 15), (5, 22)].into_iter().collect();
/// assert_eq!(resolve_annual_quota(&rules, 4), Some(15));
/// assert_eq!(resolve_annual_quota(&rules, 5), Some(22));
/// assert_eq!(resolve_annual_quota(&rules, 7), Some(22));
/// assert_eq!(resolve_annual_quota(&AccrualRuleTable::default(), 2), None);
/// ```
pub fn resolve_annual_quota(rules: &AccrualRuleTable, employment_year: u32) -> Option<u32> {
    resolve_tier(rules, employment_year)
        .1
        .map(|(_, quota)| quota)
}

/// The 1-based employment year as of `reference_date`, floored at 1.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::employment_year_for;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
/// assert_eq!(employment_year_for(hired, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()), 4);
/// assert_eq!(employment_year_for(hired, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()), 5);
/// ```
pub fn employment_year_for(hire_date: NaiveDate, reference_date: NaiveDate) -> u32 {
    (years_between(hire_date, reference_date) + 1).max(1) as u32
}

/// The result of resolving an employee's entitlement for a reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementResolution {
    /// Employment year, or `None` when the hire date is unknown.
    pub employment_year: Option<u32>,
    /// How the tier was matched.
    pub tier_match: TierMatch,
    /// The configured tier year that supplied the quota.
    pub tier_year: Option<u32>,
    /// The annual quota, or `None` when rules are not configured.
    pub entitlement_days: Option<u32>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the entitlement that applies for the year ending at
/// `reference_date`.
///
/// The employment year is read from the absence-adjusted service start. An
/// unknown hire date resolves the new-hire tier (employment year 1) while
/// reporting the employment year itself as `None`.
pub fn resolve_entitlement(
    rules: &AccrualRuleTable,
    hire_date: Option<NaiveDate>,
    absences: &[AbsenceInterval],
    reference_date: NaiveDate,
    step_number: u32,
) -> EntitlementResolution {
    let employment_year = hire_date.map(|hire| {
        let start = effective_service_start(Some(hire), absences, reference_date).unwrap_or(hire);
        employment_year_for(start, reference_date)
    });
    let lookup_year = employment_year.unwrap_or(1);

    let (tier_match, tier) = resolve_tier(rules, lookup_year);
    let tier_year = tier.map(|(year, _)| year);
    let entitlement_days = tier.map(|(_, quota)| quota);

    if tier_match == TierMatch::NotConfigured {
        warn!(
            reference_date = %reference_date,
            "Accrual rules are not configured; entitlement is undefined"
        );
    } else {
        debug!(
            employment_year = lookup_year,
            tier_match = %tier_match,
            tier_year = ?tier_year,
            entitlement_days = ?entitlement_days,
            "Resolved accrual tier"
        );
    }

    let reasoning = match (tier_match, tier) {
        (TierMatch::NotConfigured, _) | (_, None) => {
            "No accrual rules are configured; entitlement is not configured".to_string()
        }
        (TierMatch::Exact, Some((year, quota))) => format!(
            "Employment year {} matches configured tier {} exactly: {} days",
            lookup_year, year, quota
        ),
        (TierMatch::Floor, Some((year, quota))) => format!(
            "Employment year {} has no tier of its own; highest tier below is {}: {} days",
            lookup_year, year, quota
        ),
        (TierMatch::LowestTier, Some((year, quota))) => format!(
            "Employment year {} is below every tier; using lowest tier {}: {} days",
            lookup_year, year, quota
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "entitlement_resolution".to_string(),
        rule_name: "Annual Entitlement Resolution".to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.map(|d| d.to_string()),
            "reference_date": reference_date.to_string(),
            "employment_year": employment_year,
            "configured_tiers": rules.len()
        }),
        output: serde_json::json!({
            "tier_match": tier_match,
            "tier_year": tier_year,
            "entitlement_days": entitlement_days
        }),
        reasoning,
    };

    EntitlementResolution {
        employment_year,
        tier_match,
        tier_year,
        entitlement_days,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn sample_rules() -> AccrualRuleTable {
        [(1, 12), (2, 13), (3, 15), (5, 22)].into_iter().collect()
    }

    // ==========================================================================
    // resolve_annual_quota
    // ==========================================================================
    #[test]
    fn test_floor_match_between_tiers() {
        assert_eq!(resolve_annual_quota(&sample_rules(), 4), Some(15));
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(resolve_annual_quota(&sample_rules(), 5), Some(22));
        assert_eq!(resolve_annual_quota(&sample_rules(), 1), Some(12));
    }

    #[test]
    fn test_floor_to_highest_tier() {
        assert_eq!(resolve_annual_quota(&sample_rules(), 7), Some(22));
    }

    #[test]
    fn test_empty_rules_is_none() {
        assert_eq!(resolve_annual_quota(&AccrualRuleTable::default(), 2), None);
    }

    #[test]
    fn test_zero_quota_is_distinct_from_unconfigured() {
        let rules: AccrualRuleTable = [(1, 0)].into_iter().collect();
        assert_eq!(resolve_annual_quota(&rules, 3), Some(0));
    }

    #[test]
    fn test_year_below_every_tier_uses_lowest() {
        let rules: AccrualRuleTable = [(3, 15), (5, 22)].into_iter().collect();
        assert_eq!(
            resolve_tier(&rules, 1),
            (TierMatch::LowestTier, Some((3, 15)))
        );
    }

    #[test]
    fn test_resolve_tier_kinds() {
        let rules = sample_rules();
        assert_eq!(resolve_tier(&rules, 2).0, TierMatch::Exact);
        assert_eq!(resolve_tier(&rules, 4).0, TierMatch::Floor);
        assert_eq!(
            resolve_tier(&AccrualRuleTable::default(), 4),
            (TierMatch::NotConfigured, None)
        );
    }

    // ==========================================================================
    // employment_year_for
    // ==========================================================================
    #[test]
    fn test_employment_year_anniversary_boundary() {
        let hire = make_date("2020-03-15");
        assert_eq!(employment_year_for(hire, make_date("2024-03-14")), 4);
        assert_eq!(employment_year_for(hire, make_date("2024-03-15")), 5);
    }

    #[test]
    fn test_employment_year_first_year() {
        let hire = make_date("2024-06-01");
        assert_eq!(employment_year_for(hire, make_date("2024-12-31")), 1);
    }

    #[test]
    fn test_employment_year_floors_at_one() {
        let hire = make_date("2025-06-01");
        assert_eq!(employment_year_for(hire, make_date("2024-12-31")), 1);
    }

    // ==========================================================================
    // resolve_entitlement
    // ==========================================================================
    #[test]
    fn test_resolve_entitlement_with_hire_date() {
        let result = resolve_entitlement(
            &sample_rules(),
            Some(make_date("2021-03-15")),
            &[],
            make_date("2024-12-31"),
            2,
        );

        assert_eq!(result.employment_year, Some(4));
        assert_eq!(result.tier_match, TierMatch::Floor);
        assert_eq!(result.tier_year, Some(3));
        assert_eq!(result.entitlement_days, Some(15));

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "entitlement_resolution");
        assert_eq!(result.audit_step.output["tier_match"], "floor");
        assert_eq!(result.audit_step.output["entitlement_days"], 15);
    }

    #[test]
    fn test_missing_hire_date_uses_new_hire_tier() {
        let result =
            resolve_entitlement(&sample_rules(), None, &[], make_date("2024-12-31"), 1);

        assert_eq!(result.employment_year, None);
        assert_eq!(result.entitlement_days, Some(12));
        assert!(result.audit_step.input["hire_date"].is_null());
    }

    #[test]
    fn test_unconfigured_rules_yield_none() {
        let result = resolve_entitlement(
            &AccrualRuleTable::default(),
            Some(make_date("2021-03-15")),
            &[],
            make_date("2024-12-31"),
            1,
        );

        assert_eq!(result.employment_year, Some(4));
        assert_eq!(result.tier_match, TierMatch::NotConfigured);
        assert_eq!(result.entitlement_days, None);
        assert!(result.audit_step.output["entitlement_days"].is_null());
    }

    #[test]
    fn test_extended_absence_delays_tier_change() {
        // Hired 2020-12-01: year-end 2024 would be employment year 5, but a
        // 61-day absence pushes the fourth anniversary into 2025.
        let absences = vec![
            AbsenceInterval::new(make_date("2022-03-01"), make_date("2022-04-30")).unwrap(),
        ];
        let without = resolve_entitlement(
            &sample_rules(),
            Some(make_date("2020-12-01")),
            &[],
            make_date("2024-12-31"),
            1,
        );
        let with = resolve_entitlement(
            &sample_rules(),
            Some(make_date("2020-12-01")),
            &absences,
            make_date("2024-12-31"),
            1,
        );

        assert_eq!(without.employment_year, Some(5));
        assert_eq!(without.entitlement_days, Some(22));
        assert_eq!(with.employment_year, Some(4));
        assert_eq!(with.entitlement_days, Some(15));
    }
}
