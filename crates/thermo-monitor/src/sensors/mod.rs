//! Reading sources.
//!
//! Provides the TMP102 hardware source and a simulated source for running
//! without a sensor attached.

mod simulated;
mod tmp102;

pub use simulated::SimulatedSensor;

use chrono::{DateTime, Local};

/// Trait for anything that can produce a temperature reading.
pub trait ReadingSource {
    /// Returns the source name.
    fn name(&self) -> &str;

    /// Reads the current value in °C.
    fn read(&mut self) -> thermo_hw::Result<f64>;
}

/// A value accepted into the history together with its acquisition time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub taken_at: DateTime<Local>,
}

impl Reading {
    pub fn new(value: f64, taken_at: DateTime<Local>) -> Self {
        Self { value, taken_at }
    }
}
