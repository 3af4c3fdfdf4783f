//! Error types for the monitor loop.
//!
//! None of these stop the loop; they are logged and the tick degrades.

use thiserror::Error;

/// Non-fatal failures of the loop's collaborators.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The reading source could not produce a value.
    #[error("Sensor unavailable: {0}")]
    SourceUnavailable(#[from] thermo_hw::Error),

    /// The persistence sink could not be opened or written.
    #[error("Log sink unavailable: {0}")]
    SinkUnavailable(#[source] std::io::Error),

    /// The command source could not be polled.
    #[error("Command input unavailable: {0}")]
    InputUnavailable(#[source] std::io::Error),
}

impl MonitorError {
    /// Short name of the failing collaborator, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorError::SourceUnavailable(_) => "source",
            MonitorError::SinkUnavailable(_) => "sink",
            MonitorError::InputUnavailable(_) => "input",
        }
    }
}
