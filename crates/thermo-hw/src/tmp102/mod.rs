//! TMP102 sensor module.
//!
//! Provides temperature readings from a TMP102 via i2c-dev.

mod device;

pub mod protocol;

pub use device::Tmp102;
pub use protocol::{decode_temperature, Register, CELSIUS_PER_LSB};
