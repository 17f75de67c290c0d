//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company leave
//! policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AccrualRuleTable, AccrualRulesConfig, CarryoverConfig, CarryoverPolicy, LeavePolicy,
};

/// Loads and provides access to company leave policy.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── accrual_rules.yaml   # Employment year -> annual quota tiers
/// └── carryover.yaml       # Carryover expiry month/day
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("{} accrual tiers", loader.accrual_rules().len());
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: LeavePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded policy breaks a policy invariant
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_path = path.join("accrual_rules.yaml");
        let rules_config = Self::load_yaml::<AccrualRulesConfig>(&rules_path)?;

        let carryover_path = path.join("carryover.yaml");
        let carryover_config = Self::load_yaml::<CarryoverConfig>(&carryover_path)?;

        let policy = LeavePolicy::new(rules_config.rules, carryover_config.carryover)?;

        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Returns the accrual rule table.
    pub fn accrual_rules(&self) -> &AccrualRuleTable {
        self.policy.accrual_rules()
    }

    /// Returns the carryover policy.
    pub fn carryover(&self) -> &CarryoverPolicy {
        self.policy.carryover()
    }
}
