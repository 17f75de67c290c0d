//! Configuration loading and management for the leave entitlement engine.
//!
//! This module loads company leave policy (accrual tiers and carryover
//! cutoff) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Carryover expires on month {}", config.carryover().expiry_month);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccrualRuleTable, AccrualRulesConfig, CarryoverConfig, CarryoverPolicy, LeavePolicy,
};
