//! Calculation logic for the Leave Entitlement Engine.
//!
//! This module contains the date arithmetic and policy evaluation behind
//! every balance: calendar helpers and working-day counts, extended absence
//! deduction, effective tenure and anniversaries, accrual tier resolution,
//! carryover eligibility and the yearly balance aggregation.

mod absence;
mod anniversary;
mod balance;
mod calendar;
mod carryover;
mod entitlement;
mod tenure;

pub use absence::{qualifying_absences, total_deductible_days};
pub use anniversary::{AnniversaryEntry, anniversary_in_year, is_anniversary, month_anniversaries};
pub use balance::{
    WARNING_HIRE_DATE_MISSING, WARNING_PAID_USAGE_EXCEEDS_ENTITLEMENT,
    WARNING_RULES_NOT_CONFIGURED, compute_year_balance,
};
pub use calendar::{
    DaySpan, DaySpanIter, MAX_YEAR, MIN_YEAR, check_date_bounds, check_year_bounds,
    count_working_days, day_span, days_in_month, is_leap_year, is_weekend, parse_date,
    years_between,
};
pub use carryover::{CarryoverStatus, carryover_cutoff, compute_carryover, is_carryover_eligible};
pub use entitlement::{
    EntitlementResolution, TierMatch, employment_year_for, resolve_annual_quota,
    resolve_entitlement, resolve_tier,
};
pub use tenure::{TenureResult, effective_service_start, effective_tenure, raw_tenure};
