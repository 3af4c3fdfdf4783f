//! Simulated temperature source.

use super::ReadingSource;
use std::f64::consts::TAU;
use thermo_hw::tmp102::CELSIUS_PER_LSB;

/// Deterministic sine wave around a base temperature.
///
/// Values are quantised to the TMP102 resolution so the log looks like
/// real sensor output.
pub struct SimulatedSensor {
    base: f64,
    amplitude: f64,
    period: u64,
    tick: u64,
}

impl SimulatedSensor {
    /// Creates a source swinging `amplitude` °C around `base` over `period` reads.
    pub fn new(base: f64, amplitude: f64, period: u64) -> Self {
        Self {
            base,
            amplitude,
            period: period.max(1),
            tick: 0,
        }
    }
}

impl Default for SimulatedSensor {
    /// Swings 8–32 °C over a minute at the default cadence, crossing both
    /// default thresholds.
    fn default() -> Self {
        Self::new(20.0, 12.0, 60)
    }
}

impl ReadingSource for SimulatedSensor {
    fn name(&self) -> &str {
        "simulated"
    }

    fn read(&mut self) -> thermo_hw::Result<f64> {
        let phase = (self.tick % self.period) as f64 / self.period as f64;
        self.tick += 1;
        let value = self.base + self.amplitude * (phase * TAU).sin();
        let lsb = f64::from(CELSIUS_PER_LSB);
        Ok((value / lsb).round() * lsb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_base() {
        let mut sensor = SimulatedSensor::new(21.0, 5.0, 4);
        assert_eq!(sensor.read().unwrap(), 21.0);
    }

    #[test]
    fn test_quarter_periods() {
        let mut sensor = SimulatedSensor::new(20.0, 10.0, 4);
        let values: Vec<f64> = (0..5).map(|_| sensor.read().unwrap()).collect();
        assert_eq!(values, vec![20.0, 30.0, 20.0, 10.0, 20.0]);
    }

    #[test]
    fn test_quantised_to_sensor_resolution() {
        let mut sensor = SimulatedSensor::default();
        for _ in 0..120 {
            let value = sensor.read().unwrap();
            let steps = value / 0.0625;
            assert_eq!(steps, steps.round());
            assert!((8.0..=32.0).contains(&value));
        }
    }

    #[test]
    fn test_zero_period_does_not_panic() {
        let mut sensor = SimulatedSensor::new(20.0, 1.0, 0);
        assert_eq!(sensor.read().unwrap(), 20.0);
    }
}
