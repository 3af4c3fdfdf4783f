//! TMP102 device communication via i2c-dev.

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::protocol::{
    build_pointer_packet, decode_temperature, timeout_ticks, Register, I2C_SLAVE, I2C_TIMEOUT,
    TEMPERATURE_SIZE,
};

/// TMP102 sensor handle.
///
/// The bus node is closed when the handle is dropped.
pub struct Tmp102 {
    bus: File,
}

impl Tmp102 {
    /// Opens the i2c-dev node and selects the sensor's slave address.
    pub fn open<P: AsRef<Path>>(path: P, address: u16, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let bus = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| Error::DeviceOpen {
                path: path.display().to_string(),
                source,
            })?;

        // SAFETY: the descriptor is owned by `bus` and stays open for the call.
        let rc = unsafe { libc::ioctl(bus.as_raw_fd(), I2C_SLAVE as _, address as libc::c_ulong) };
        if rc < 0 {
            return Err(Error::SetAddress {
                address,
                source: std::io::Error::last_os_error(),
            });
        }

        let ticks = timeout_ticks(timeout.as_millis() as u64);
        // SAFETY: as above.
        let rc = unsafe { libc::ioctl(bus.as_raw_fd(), I2C_TIMEOUT as _, ticks as libc::c_ulong) };
        if rc < 0 {
            // Not every adapter driver honours the timeout
            warn!(
                "Could not set I2C timeout on {}: {}",
                path.display(),
                std::io::Error::last_os_error()
            );
        }

        let mut sensor = Self { bus };
        sensor.select(Register::Temperature)?;

        info!("TMP102 opened at {} (address 0x{:02X})", path.display(), address);
        Ok(sensor)
    }

    /// Points subsequent reads at `register`.
    fn select(&mut self, register: Register) -> Result<()> {
        let packet = build_pointer_packet(register);
        self.bus.write_all(&packet)?;
        debug!("Selected register {:?}", register);
        Ok(())
    }

    /// Reads the current temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<f32> {
        let mut buf = [0u8; TEMPERATURE_SIZE];
        let n = self.bus.read(&mut buf)?;
        if n != TEMPERATURE_SIZE {
            return Err(Error::ShortRead {
                expected: TEMPERATURE_SIZE,
                actual: n,
            });
        }

        let celsius = decode_temperature(buf);
        debug!("TMP102 raw {:02X?} -> {} °C", buf, celsius);
        Ok(celsius)
    }
}
