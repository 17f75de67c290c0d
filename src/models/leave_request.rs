//! Leave request model and its status lifecycle.
//!
//! A request is created `Pending` and moves exactly once, to `Approved`,
//! `Rejected` or `Canceled`. Only approved requests consume leave.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{check_date_bounds, count_working_days};
use crate::error::{EngineError, EngineResult};

/// The review status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting an approver decision.
    Pending,
    /// Approved by an approver; counts toward consumption.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the requester while still pending.
    Canceled,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
            LeaveStatus::Canceled => write!(f, "canceled"),
        }
    }
}

impl LeaveStatus {
    /// Returns true for states that admit no further change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    /// Validates a status change and returns the new status.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::LeaveStatus;
    ///
    /// assert_eq!(
    ///     LeaveStatus::Pending.transition_to(LeaveStatus::Approved).unwrap(),
    ///     LeaveStatus::Approved
    /// );
    /// assert!(LeaveStatus::Approved.transition_to(LeaveStatus::Canceled).is_err());
    /// ```
    pub fn transition_to(self, next: LeaveStatus) -> EngineResult<LeaveStatus> {
        match (self, next) {
            (LeaveStatus::Pending, LeaveStatus::Approved)
            | (LeaveStatus::Pending, LeaveStatus::Rejected)
            | (LeaveStatus::Pending, LeaveStatus::Canceled) => Ok(next),
            _ => Err(EngineError::InvalidStatusTransition {
                from: self.to_string(),
                to: next.to_string(),
            }),
        }
    }
}

/// A leave request as supplied by the leave-request provider.
///
/// Dates are checked against the engine's year bounds and `end_date` may
/// not precede `start_date`, both on construction and when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLeaveRequestRecord")]
pub struct LeaveRequestRecord {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive). Absent for single-day requests.
    pub end_date: Option<NaiveDate>,
    /// Whether the request is for half a day.
    pub is_half_day: bool,
    /// Current review status.
    pub status: LeaveStatus,
    /// Whether the request's leave type draws on the paid entitlement.
    pub leave_type_is_paid: bool,
}

#[derive(Deserialize)]
struct RawLeaveRequestRecord {
    id: Uuid,
    user_id: String,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    is_half_day: bool,
    status: LeaveStatus,
    leave_type_is_paid: bool,
}

impl TryFrom<RawLeaveRequestRecord> for LeaveRequestRecord {
    type Error = EngineError;

    fn try_from(raw: RawLeaveRequestRecord) -> EngineResult<Self> {
        check_request_dates(raw.start_date, raw.end_date)?;
        Ok(Self {
            id: raw.id,
            user_id: raw.user_id,
            start_date: raw.start_date,
            end_date: raw.end_date,
            is_half_day: raw.is_half_day,
            status: raw.status,
            leave_type_is_paid: raw.leave_type_is_paid,
        })
    }
}

fn check_request_dates(start_date: NaiveDate, end_date: Option<NaiveDate>) -> EngineResult<()> {
    check_date_bounds(start_date)?;
    if let Some(end) = end_date {
        check_date_bounds(end)?;
        if end < start_date {
            return Err(EngineError::InvalidRange {
                start: start_date,
                end,
            });
        }
    }
    Ok(())
}

impl LeaveRequestRecord {
    /// Creates a new pending request.
    ///
    /// Fails with `DateParse` if a date is outside the supported years and
    /// with `InvalidRange` if `end_date` precedes `start_date`.
    pub fn new_pending(
        user_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        is_half_day: bool,
        leave_type_is_paid: bool,
    ) -> EngineResult<Self> {
        check_request_dates(start_date, end_date)?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            start_date,
            end_date,
            is_half_day,
            status: LeaveStatus::Pending,
            leave_type_is_paid,
        })
    }

    /// Approver action: marks a pending request approved.
    pub fn approve(&mut self) -> EngineResult<()> {
        self.status = self.status.transition_to(LeaveStatus::Approved)?;
        Ok(())
    }

    /// Approver action: marks a pending request rejected.
    pub fn reject(&mut self) -> EngineResult<()> {
        self.status = self.status.transition_to(LeaveStatus::Rejected)?;
        Ok(())
    }

    /// Requester action: withdraws a pending request.
    pub fn cancel(&mut self) -> EngineResult<()> {
        self.status = self.status.transition_to(LeaveStatus::Canceled)?;
        Ok(())
    }

    /// Returns true if the request counts toward consumption.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Returns true if the request starts within the calendar year.
    pub fn starts_in_year(&self, year: i32) -> bool {
        self.start_date.year() == year
    }

    /// Working days this request consumes.
    pub fn working_days(&self) -> EngineResult<Decimal> {
        count_working_days(self.start_date, self.end_date, self.is_half_day)
    }
}
