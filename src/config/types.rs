//! Configuration types for company leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::days_in_month;
use crate::error::{EngineError, EngineResult};

/// Sparse mapping from employment year to annual paid leave quota in days.
///
/// Only the tiers an administrator configured are present. Keys are kept
/// sorted so that floor lookups are a single range scan.
///
/// # Example
///
/// ```
/// use leave_engine::config::AccrualRuleTable;
///
/// let rules: AccrualRuleTable = [(1, 12), (2, 13), (3, 15), (5, 22)].into_iter().collect();
/// assert_eq!(rules.get(5), Some(22));
/// assert_eq!(rules.get(4), None);
/// assert_eq!(rules.floor(4), Some((3, 15)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccrualRuleTable(BTreeMap<u32, u32>);

impl AccrualRuleTable {
    /// Creates a rule table from an already-built map.
    pub fn new(rules: BTreeMap<u32, u32>) -> Self {
        Self(rules)
    }

    /// Returns the quota configured for exactly this employment year.
    pub fn get(&self, employment_year: u32) -> Option<u32> {
        self.0.get(&employment_year).copied()
    }

    /// Returns the highest configured tier at or below the employment year.
    pub fn floor(&self, employment_year: u32) -> Option<(u32, u32)> {
        self.0
            .range(..=employment_year)
            .next_back()
            .map(|(year, quota)| (*year, *quota))
    }

    /// Returns the lowest configured tier.
    pub fn first(&self) -> Option<(u32, u32)> {
        self.0.iter().next().map(|(year, quota)| (*year, *quota))
    }

    /// Returns true when no tier is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of configured tiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates tiers in ascending employment-year order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(year, quota)| (*year, *quota))
    }

    /// Checks that every key is a positive employment year.
    pub fn validate(&self) -> EngineResult<()> {
        if self.0.contains_key(&0) {
            return Err(EngineError::InvalidPolicy {
                field: "accrual_rules".to_string(),
                message: "employment year keys start at 1, got 0".to_string(),
            });
        }
        Ok(())
    }
}

impl FromIterator<(u32, u32)> for AccrualRuleTable {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The day after which unused prior-year paid days are forfeited.
///
/// # Example
///
/// ```
/// use leave_engine::config::CarryoverPolicy;
/// use chrono::NaiveDate;
///
/// let policy = CarryoverPolicy { expiry_month: 3, expiry_day: 31 };
/// assert_eq!(
///     policy.cutoff_for(2025).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryoverPolicy {
    /// Month of the cutoff (1-12).
    pub expiry_month: u32,
    /// Day of the cutoff within the month.
    pub expiry_day: u32,
}

impl CarryoverPolicy {
    /// Checks the month is 1-12 and the day exists in that month in some year.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.expiry_month) {
            return Err(EngineError::InvalidPolicy {
                field: "carryover.expiry_month".to_string(),
                message: format!("must be between 1 and 12, got {}", self.expiry_month),
            });
        }

        // 2000 is a leap year, so Feb 29 is accepted here and clamped later.
        let max_day = days_in_month(2000, self.expiry_month);
        if !(1..=max_day).contains(&self.expiry_day) {
            return Err(EngineError::InvalidPolicy {
                field: "carryover.expiry_day".to_string(),
                message: format!(
                    "must be between 1 and {} for month {}, got {}",
                    max_day, self.expiry_month, self.expiry_day
                ),
            });
        }

        Ok(())
    }

    /// Resolves the cutoff date inside `year`.
    ///
    /// A Feb 29 cutoff falls on Feb 28 in non-leap years.
    pub fn cutoff_for(&self, year: i32) -> EngineResult<NaiveDate> {
        self.validate()?;
        let day = self.expiry_day.min(days_in_month(year, self.expiry_month));
        NaiveDate::from_ymd_opt(year, self.expiry_month, day).ok_or_else(|| {
            EngineError::DateParse {
                input: format!("{}-{:02}-{:02}", year, self.expiry_month, day),
                message: "carryover cutoff is not a representable date".to_string(),
            }
        })
    }
}

/// Accrual rules file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AccrualRulesConfig {
    /// Map of employment year to annual quota.
    #[serde(default)]
    pub rules: AccrualRuleTable,
}

/// Carryover file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CarryoverConfig {
    /// Carryover expiry settings.
    pub carryover: CarryoverPolicy,
}

/// The complete company leave policy.
///
/// Aggregates the accrual tiers and the carryover cutoff. Both are read-only
/// snapshots for the duration of a computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLeavePolicy")]
pub struct LeavePolicy {
    /// Employment year to annual quota tiers.
    accrual_rules: AccrualRuleTable,
    /// Carryover expiry settings.
    carryover: CarryoverPolicy,
}

#[derive(Deserialize)]
struct RawLeavePolicy {
    accrual_rules: AccrualRuleTable,
    carryover: CarryoverPolicy,
}

impl TryFrom<RawLeavePolicy> for LeavePolicy {
    type Error = EngineError;

    fn try_from(raw: RawLeavePolicy) -> EngineResult<Self> {
        Self::new(raw.accrual_rules, raw.carryover)
    }
}

impl LeavePolicy {
    /// Creates a validated policy from its component parts.
    pub fn new(accrual_rules: AccrualRuleTable, carryover: CarryoverPolicy) -> EngineResult<Self> {
        let policy = Self {
            accrual_rules,
            carryover,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Validates both parts of the policy.
    pub fn validate(&self) -> EngineResult<()> {
        self.accrual_rules.validate()?;
        self.carryover.validate()
    }

    /// Returns the accrual rule table.
    pub fn accrual_rules(&self) -> &AccrualRuleTable {
        &self.accrual_rules
    }

    /// Returns the carryover policy.
    pub fn carryover(&self) -> &CarryoverPolicy {
        &self.carryover
    }
}
