//! Thermo Hardware Library
//!
//! Provides access to the TMP102 digital temperature sensor over the Linux
//! i2c-dev interface.

pub mod error;
pub mod tmp102;

pub use error::{Error, Result};
pub use tmp102::Tmp102;

/// Default i2c-dev bus node (Raspberry Pi header pins 3/5).
pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";

/// Default TMP102 slave address (ADD0 tied to ground).
pub const TMP102_ADDRESS: u16 = 0x48;
