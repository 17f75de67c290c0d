//! Extended absence interval model.
//!
//! This module defines [`AbsenceInterval`], the inclusive date range of an
//! absence record, and the overlap arithmetic used to deduct absence time
//! from a tenure clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::check_date_bounds;
use crate::error::{EngineError, EngineResult};

/// Absences must last strictly longer than this many consecutive calendar
/// days to count against tenure.
pub const EXTENDED_ABSENCE_THRESHOLD_DAYS: i64 = 30;

/// An inclusive absence period owned by a single user.
///
/// Construction enforces `start <= end` and the engine's year bounds,
/// including when deserializing.
///
/// # Example
///
/// ```
/// use leave_engine::models::AbsenceInterval;
/// use chrono::NaiveDate;
///
/// let absence = AbsenceInterval::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(absence.length_days(), 31);
/// assert!(absence.is_qualifying());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAbsenceInterval")]
pub struct AbsenceInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawAbsenceInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawAbsenceInterval> for AbsenceInterval {
    type Error = EngineError;

    fn try_from(raw: RawAbsenceInterval) -> EngineResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl AbsenceInterval {
    /// Creates an interval.
    ///
    /// Fails with `DateParse` if either end is outside the supported years
    /// and with `InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        check_date_bounds(start)?;
        check_date_bounds(end)?;
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the absence.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the absence (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// True when the absence lasts more than 30 consecutive days.
    pub fn is_qualifying(&self) -> bool {
        self.length_days() > EXTENDED_ABSENCE_THRESHOLD_DAYS
    }

    /// Counts the days shared with the inclusive range `[range_start, range_end]`.
    ///
    /// Returns `0` when the two are disjoint and `InvalidRange` when the
    /// reference range is inverted.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::AbsenceInterval;
    /// use chrono::NaiveDate;
    ///
    /// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
    /// let absence = AbsenceInterval::new(d(3, 1), d(4, 30)).unwrap();
    ///
    /// assert_eq!(absence.overlap_days(d(4, 1), d(12, 31)).unwrap(), 30);
    /// assert_eq!(absence.overlap_days(d(6, 1), d(6, 30)).unwrap(), 0);
    /// ```
    pub fn overlap_days(&self, range_start: NaiveDate, range_end: NaiveDate) -> EngineResult<i64> {
        if range_start > range_end {
            return Err(EngineError::InvalidRange {
                start: range_start,
                end: range_end,
            });
        }

        let lo = self.start.max(range_start);
        let hi = self.end.min(range_end);
        if lo > hi {
            return Ok(0);
        }
        Ok((hi - lo).num_days() + 1)
    }
}
