//! Employee model.
//!
//! This module defines the employment record the engine reads tenure from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::check_date_bounds;
use crate::error::{EngineError, EngineResult};

use super::AbsenceInterval;

/// An employee as supplied by the user-record provider.
///
/// `extended_absences` holds the rows returned by the absence-record
/// provider for this user. They may be raw; the engine applies the
/// 30-day gate itself. A deserialized hire date must fall within the
/// engine's year bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEmployee")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The date the employee was hired, if recorded.
    pub hire_date: Option<NaiveDate>,
    /// Whether the employee is currently active.
    pub is_active: bool,
    /// Absence periods registered for the employee.
    pub extended_absences: Vec<AbsenceInterval>,
}

#[derive(Deserialize)]
struct RawEmployee {
    id: String,
    name: String,
    hire_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    extended_absences: Vec<AbsenceInterval>,
}

impl TryFrom<RawEmployee> for Employee {
    type Error = EngineError;

    fn try_from(raw: RawEmployee) -> EngineResult<Self> {
        let hire_date = raw.hire_date.map(check_date_bounds).transpose()?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            hire_date,
            is_active: raw.is_active,
            extended_absences: raw.extended_absences,
        })
    }
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee is active and has a hire date.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Jamie".to_string(),
    ///     hire_date: Some(NaiveDate::from_ymd_opt(2020, 3, 15).unwrap()),
    ///     is_active: true,
    ///     extended_absences: vec![],
    /// };
    /// assert!(employee.has_tenure());
    /// ```
    pub fn has_tenure(&self) -> bool {
        self.is_active && self.hire_date.is_some()
    }
}
