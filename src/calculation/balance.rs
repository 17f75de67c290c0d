//! Yearly balance aggregation.
//!
//! This module combines per-request working-day counts, the resolved
//! entitlement and the carryover cutoff into a [`BalanceSummary`] with a
//! complete audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AbsenceInterval, AuditStep, AuditTrace, AuditWarning, BalanceSummary, LeaveRequestRecord,
    StatusCounts,
};

use super::calendar::check_year_bounds;
use super::carryover::carryover_cutoff;
use super::entitlement::resolve_entitlement;

/// Warning code when the balance is computed without a hire date.
pub const WARNING_HIRE_DATE_MISSING: &str = "HIRE_DATE_MISSING";

/// Warning code when the accrual rule table is empty.
pub const WARNING_RULES_NOT_CONFIGURED: &str = "ACCRUAL_RULES_NOT_CONFIGURED";

/// Warning code when approved paid usage exceeds the entitlement.
pub const WARNING_PAID_USAGE_EXCEEDS_ENTITLEMENT: &str = "PAID_USAGE_EXCEEDS_ENTITLEMENT";

fn year_bound(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| EngineError::DateParse {
        input: format!("{}-{:02}-{:02}", year, month, day),
        message: "date is not representable".to_string(),
    })
}

/// Computes an employee's leave balance for a calendar year.
///
/// # Arguments
///
/// * `year` - The calendar year to summarise
/// * `requests` - The employee's leave requests in any status
/// * `policy` - Accrual tiers and carryover cutoff
/// * `hire_date` - The employee's hire date, if recorded
/// * `absences` - The employee's absence rows (raw or pre-filtered)
///
/// # Behavior
///
/// - Requests are attributed to the year their start date falls in.
/// - Every such request is counted by status; only approved ones consume
///   days, into the paid or unpaid bucket by leave type.
/// - The entitlement is the tier for the employment year at Dec 31.
/// - `remaining_days` is entitlement minus paid usage; unpaid usage never
///   reduces it. It is `None` when the rule table is empty.
///
/// # Errors
///
/// - `DateParse` if `year` is outside the supported range.
/// - `InvalidRange` if an approved request ends before it starts.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::compute_year_balance;
/// use leave_engine::config::{AccrualRuleTable, CarryoverPolicy, LeavePolicy};
/// use leave_engine::models::LeaveRequestRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let rules: AccrualRuleTable = [(1, 12), (2, 13), (3, 15), (5, 22)].into_iter().collect();
/// let policy = LeavePolicy::new(rules, CarryoverPolicy { expiry_month: 3, expiry_day: 31 }).unwrap();
///
/// let mut week_off =
///     LeaveRequestRecord::new_pending("emp_001", d(2024, 6, 3), Some(d(2024, 6, 7)), false, true).unwrap();
/// week_off.approve().unwrap();
///
/// let summary = compute_year_balance(2024, &[week_off], &policy, Some(d(2021, 3, 15)), &[]).unwrap();
/// assert_eq!(summary.employment_year, Some(4));
/// assert_eq!(summary.paid_used_days, Decimal::from(5));
/// assert_eq!(summary.remaining_days, Some(Decimal::from(10)));
/// ```
pub fn compute_year_balance(
    year: i32,
    requests: &[LeaveRequestRecord],
    policy: &LeavePolicy,
    hire_date: Option<NaiveDate>,
    absences: &[AbsenceInterval],
) -> EngineResult<BalanceSummary> {
    check_year_bounds(year)?;
    let year_end = year_bound(year, 12, 31)?;

    let mut trace = AuditTrace::default();

    if hire_date.is_none() {
        warn!(year, "Computing balance without a hire date; using new-hire tier");
        trace.warnings.push(AuditWarning::new(
            WARNING_HIRE_DATE_MISSING,
            "No hire date recorded; the new-hire accrual tier was applied",
            "low",
        ));
    }

    let mut counts_by_status = StatusCounts::default();
    let mut paid_used_days = Decimal::ZERO;
    let mut unpaid_used_days = Decimal::ZERO;

    for request in requests.iter().filter(|r| r.starts_in_year(year)) {
        counts_by_status.record(request.status);
        if !request.is_approved() {
            continue;
        }

        let working_days = request.working_days()?;
        let bucket = if request.leave_type_is_paid {
            paid_used_days += working_days;
            "paid"
        } else {
            unpaid_used_days += working_days;
            "unpaid"
        };

        debug!(
            request_id = %request.id,
            start_date = %request.start_date,
            working_days = %working_days,
            bucket,
            "Counted approved leave request"
        );

        let step_number = trace.next_step_number();
        trace.steps.push(AuditStep {
            step_number,
            rule_id: "working_day_count".to_string(),
            rule_name: "Working Day Count".to_string(),
            input: serde_json::json!({
                "request_id": request.id.to_string(),
                "start_date": request.start_date.to_string(),
                "end_date": request.end_date.map(|d| d.to_string()),
                "is_half_day": request.is_half_day,
                "leave_type_is_paid": request.leave_type_is_paid
            }),
            output: serde_json::json!({
                "working_days": working_days.normalize().to_string(),
                "bucket": bucket
            }),
            reasoning: if request.is_half_day {
                format!("Half-day request counts as {} days", working_days.normalize())
            } else {
                format!(
                    "{} weekday(s) charged to the {} bucket",
                    working_days.normalize(),
                    bucket
                )
            },
        });
    }

    let resolution = resolve_entitlement(
        policy.accrual_rules(),
        hire_date,
        absences,
        year_end,
        trace.next_step_number(),
    );
    trace.steps.push(resolution.audit_step);

    if resolution.entitlement_days.is_none() {
        trace.warnings.push(AuditWarning::new(
            WARNING_RULES_NOT_CONFIGURED,
            "No accrual rules are configured; entitlement and remaining days are undefined",
            "medium",
        ));
    }

    let entitlement_days = resolution.entitlement_days.map(Decimal::from);
    let remaining_days = entitlement_days.map(|entitlement| entitlement - paid_used_days);

    if remaining_days.is_some_and(|remaining| remaining < Decimal::ZERO) {
        trace.warnings.push(AuditWarning::new(
            WARNING_PAID_USAGE_EXCEEDS_ENTITLEMENT,
            format!(
                "Approved paid leave of {} days exceeds the annual entitlement",
                paid_used_days.normalize()
            ),
            "high",
        ));
    }

    let step_number = trace.next_step_number();
    trace.steps.push(AuditStep {
        step_number,
        rule_id: "remaining_balance".to_string(),
        rule_name: "Remaining Balance".to_string(),
        input: serde_json::json!({
            "entitlement_days": entitlement_days.map(|d| d.normalize().to_string()),
            "paid_used_days": paid_used_days.normalize().to_string(),
            "unpaid_used_days": unpaid_used_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "remaining_days": remaining_days.map(|d| d.normalize().to_string())
        }),
        reasoning: match (entitlement_days, remaining_days) {
            (Some(entitlement), Some(remaining)) => format!(
                "{} entitled - {} paid used = {} remaining; unpaid usage does not reduce the balance",
                entitlement.normalize(),
                paid_used_days.normalize(),
                remaining.normalize()
            ),
            _ => "Entitlement is not configured; remaining balance is undefined".to_string(),
        },
    });

    let carryover_expires_on = carryover_cutoff(policy.carryover(), year)?;

    debug!(
        year,
        employment_year = ?resolution.employment_year,
        entitlement_days = ?entitlement_days,
        paid_used_days = %paid_used_days,
        unpaid_used_days = %unpaid_used_days,
        remaining_days = ?remaining_days,
        "Computed year balance"
    );

    Ok(BalanceSummary {
        year,
        entitlement_days,
        employment_year: resolution.employment_year,
        paid_used_days,
        unpaid_used_days,
        remaining_days,
        counts_by_status,
        carryover_expires_on,
        audit_trace: trace,
    })
}
