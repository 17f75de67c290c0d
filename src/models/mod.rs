//! Core data models for the leave entitlement engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod balance_summary;
mod employee;
mod leave_request;

pub use absence::{AbsenceInterval, EXTENDED_ABSENCE_THRESHOLD_DAYS};
pub use balance_summary::{AuditStep, AuditTrace, AuditWarning, BalanceSummary, StatusCounts};
pub use employee::Employee;
pub use leave_request::{LeaveRequestRecord, LeaveStatus};
