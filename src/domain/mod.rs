//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the normalized time series type (`Series`)
//! - signal classification types (`Flag`, `Trend`, `FlagRule`)
//! - the static metric table (`METRICS`) and regime bands (`REGIME_BANDS`)
//! - display rows (`MetricRow`) and run configuration (`DashConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
