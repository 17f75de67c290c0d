//! Balance summary models for the leave entitlement engine.
//!
//! This module contains the [`BalanceSummary`] type and its associated
//! structures that capture all outputs from a yearly balance computation,
//! including per-status counts and an audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LeaveStatus;

/// A single step in the audit trace recording a computation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during computation.
///
/// Warnings flag conditions that do not stop the computation but that a
/// reader of the summary should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning from its parts.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of computation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during computation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Number the next step will receive.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Returns true if a warning with this code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Number of requests in each status, for visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Requests awaiting review.
    pub pending: u32,
    /// Approved requests.
    pub approved: u32,
    /// Rejected requests.
    pub rejected: u32,
    /// Canceled requests.
    pub canceled: u32,
}

impl StatusCounts {
    /// Increments the counter for `status`.
    pub fn record(&mut self, status: LeaveStatus) {
        match status {
            LeaveStatus::Pending => self.pending += 1,
            LeaveStatus::Approved => self.approved += 1,
            LeaveStatus::Rejected => self.rejected += 1,
            LeaveStatus::Canceled => self.canceled += 1,
        }
    }

    /// Returns the counter for `status`.
    pub fn get(&self, status: LeaveStatus) -> u32 {
        match status {
            LeaveStatus::Pending => self.pending,
            LeaveStatus::Approved => self.approved,
            LeaveStatus::Rejected => self.rejected,
            LeaveStatus::Canceled => self.canceled,
        }
    }

    /// Total requests counted.
    pub fn total(&self) -> u32 {
        self.pending + self.approved + self.rejected + self.canceled
    }
}

/// The leave balance of one employee for one calendar year.
///
/// `entitlement_days` and `remaining_days` are `None` when the accrual rule
/// table is not configured; callers render that as "not configured", never
/// as zero. `employment_year` is `None` when the hire date is unknown.
///
/// # Example
///
/// ```
/// use leave_engine::models::{AuditTrace, BalanceSummary, StatusCounts};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let summary = BalanceSummary {
///     year: 2024,
///     entitlement_days: Some(Decimal::from(15)),
///     employment_year: Some(3),
///     paid_used_days: Decimal::from(5),
///     unpaid_used_days: Decimal::new(5, 1),
///     remaining_days: Some(Decimal::from(10)),
///     counts_by_status: StatusCounts::default(),
///     carryover_expires_on: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(summary.is_configured());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// The calendar year summarised.
    pub year: i32,
    /// Annual paid quota for the year, if rules are configured.
    pub entitlement_days: Option<Decimal>,
    /// 1-based employment year the quota was resolved for.
    pub employment_year: Option<u32>,
    /// Working days consumed by approved paid leave.
    pub paid_used_days: Decimal,
    /// Working days consumed by approved unpaid leave.
    pub unpaid_used_days: Decimal,
    /// Entitlement minus paid usage; may be negative when overdrawn.
    pub remaining_days: Option<Decimal>,
    /// Requests starting in the year, by status.
    pub counts_by_status: StatusCounts,
    /// Last day prior-year days may be carried into this year.
    pub carryover_expires_on: NaiveDate,
    /// The complete audit trace of the computation.
    pub audit_trace: AuditTrace,
}

impl BalanceSummary {
    /// Returns true if an entitlement was resolved.
    pub fn is_configured(&self) -> bool {
        self.entitlement_days.is_some()
    }

    /// Total working days consumed, paid and unpaid.
    pub fn total_used_days(&self) -> Decimal {
        self.paid_used_days + self.unpaid_used_days
    }
}
