//! Thermo Monitor
//!
//! Samples a temperature sensor on a fixed cadence, keeps running
//! statistics, classifies readings against adjustable thresholds and shows
//! everything on an interactive terminal dashboard.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod monitor;
pub mod persistence;
pub mod sensors;
pub mod stats;
pub mod terminal;
pub mod thresholds;

pub use command::Command;
pub use config::Config;
pub use error::MonitorError;
pub use monitor::{LoopState, Monitor, ReadFailurePolicy, Snapshot};
pub use stats::Statistics;
pub use thresholds::{AlertState, Thresholds};
