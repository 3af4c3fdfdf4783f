//! Error types for the thermo hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the sensor.
#[derive(Error, Debug)]
pub enum Error {
    /// The i2c-dev node could not be opened.
    #[error("Could not open I2C device {path}: {source}")]
    DeviceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The slave address could not be selected on the bus.
    #[error("Could not set I2C address 0x{address:02X}: {source}")]
    SetAddress {
        address: u16,
        #[source]
        source: std::io::Error,
    },

    /// The device returned fewer bytes than the register holds.
    #[error("Short read from sensor: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// Bus I/O error.
    #[error("I2C I/O error: {0}")]
    Io(#[from] std::io::Error),
}
