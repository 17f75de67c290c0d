//! Tenure and Leave Entitlement Engine
//!
//! This crate converts a hire date, extended absence intervals, leave request
//! records and a company-wide leave policy into effective tenure, work
//! anniversaries, annual leave entitlement and a per-year balance summary.
//!
//! Every operation is a pure function over caller-supplied snapshots.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
