//! TMP102 register layout and decoding.
//!
//! Register structure:
//! - Pointer register selects which register subsequent reads return
//! - Temperature register: 2 bytes, 12-bit two's complement, left aligned
//! - Resolution: 0.0625 °C per LSB

/// Size of the temperature register in bytes.
pub const TEMPERATURE_SIZE: usize = 2;

/// Temperature change per least significant bit.
pub const CELSIUS_PER_LSB: f32 = 0.0625;

/// Sign bit of the 12-bit conversion result.
const SIGN_BIT: u16 = 0x800;

/// Bits set when sign-extending 12 bits to 16.
const SIGN_EXTEND: u16 = 0xF000;

/// `ioctl` request: set the slave address for subsequent transfers.
pub const I2C_SLAVE: u32 = 0x0703;

/// `ioctl` request: set the transfer timeout in units of 10 ms.
pub const I2C_TIMEOUT: u32 = 0x0702;

/// TMP102 register addresses for the pointer register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Temperature conversion result (read-only).
    Temperature = 0x00,
}

/// Builds the one-byte write that points subsequent reads at `register`.
pub fn build_pointer_packet(register: Register) -> [u8; 1] {
    [register as u8]
}

/// Decodes the raw temperature register into degrees Celsius.
pub fn decode_temperature(bytes: [u8; TEMPERATURE_SIZE]) -> f32 {
    let mut raw = ((bytes[0] as u16) << 4) | ((bytes[1] as u16) >> 4);
    if raw & SIGN_BIT != 0 {
        raw |= SIGN_EXTEND;
    }
    (raw as i16) as f32 * CELSIUS_PER_LSB
}

/// Converts a timeout in milliseconds to the kernel's 10 ms units, at least 1.
pub fn timeout_ticks(timeout_ms: u64) -> u64 {
    (timeout_ms / 10).max(1)
}
