//! Error types for the leave entitlement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during tenure and balance
//! computation. Missing hire dates and empty rule tables are not errors;
//! they surface as defaults and `None` values in the results.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave entitlement engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/accrual_rules.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/accrual_rules.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A date was malformed or outside the supported year range.
    #[error("Invalid date '{input}': {message}")]
    DateParse {
        /// The offending input, as text.
        input: String,
        /// A description of why the date was rejected.
        message: String,
    },

    /// A range was given with its start after its end.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// The start of the rejected range.
        start: NaiveDate,
        /// The end of the rejected range.
        end: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave policy value broke one of the policy invariants.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave request status change was attempted out of a terminal state.
    #[error("Cannot transition leave request from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_displays_input_and_message() {
        let error = EngineError::DateParse {
            input: "2024-13-01".to_string(),
            message: "input is out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2024-13-01': input is out of range"
        );
    }

    #[test]
    fn test_invalid_range_displays_both_dates() {
        let error = EngineError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid range: start 2024-06-07 is after end 2024-06-03"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/carryover.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/carryover.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_policy_displays_field_and_message() {
        let error = EngineError::InvalidPolicy {
            field: "carryover.expiry_month".to_string(),
            message: "must be between 1 and 12, got 13".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid policy field 'carryover.expiry_month': must be between 1 and 12, got 13"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_states() {
        let error = EngineError::InvalidStatusTransition {
            from: "approved".to_string(),
            to: "canceled".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot transition leave request from approved to canceled"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_range() -> EngineResult<()> {
            Err(EngineError::InvalidRange {
                start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_range()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::InvalidRange { .. })
        ));
    }
}
