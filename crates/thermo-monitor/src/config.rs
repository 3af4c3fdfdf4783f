//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::monitor::ReadFailurePolicy;
use crate::persistence::DEFAULT_LOG_FILE;
use crate::thresholds::{Thresholds, DEFAULT_HIGH, DEFAULT_LOW, DEFAULT_STEP};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Delay between ticks in milliseconds
    #[serde(default = "default_cadence")]
    pub cadence: u64,

    /// CSV file receiving every recorded reading
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// What to do when the sensor cannot be read
    #[serde(default)]
    pub on_read_failure: ReadFailurePolicy,

    /// Sensor configuration
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Alert thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Diagnostic logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sensor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// i2c-dev node
    #[serde(default = "default_device")]
    pub device: String,

    /// 7-bit slave address
    #[serde(default = "default_address")]
    pub address: u16,

    /// Bus transaction timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Use the simulated sensor instead of the bus
    #[serde(default)]
    pub simulate: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            address: default_address(),
            timeout: default_timeout(),
            simulate: false,
        }
    }
}

/// Initial alert thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_high")]
    pub high: f64,

    #[serde(default = "default_low")]
    pub low: f64,

    /// Adjustment per key press
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high: default_high(),
            low: default_low(),
            step: default_step(),
        }
    }
}

/// Diagnostic log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Write tracing output here instead of stderr, which is silenced while
    /// the dashboard is shown
    #[serde(default)]
    pub file: Option<String>,
}

// Default value functions
fn default_cadence() -> u64 {
    1000
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_device() -> String {
    thermo_hw::DEFAULT_I2C_DEVICE.to_string()
}

fn default_address() -> u16 {
    thermo_hw::TMP102_ADDRESS
}

fn default_timeout() -> u64 {
    100
}

fn default_high() -> f64 {
    DEFAULT_HIGH
}

fn default_low() -> f64 {
    DEFAULT_LOW
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Loads configuration, falling back to defaults if the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Returns the tick cadence.
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence)
    }

    /// Returns the sensor bus timeout.
    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_millis(self.sensor.timeout)
    }

    /// Builds the initial thresholds.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::with_step(
            self.thresholds.high,
            self.thresholds.low,
            self.thresholds.step,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cadence: default_cadence(),
            log_file: default_log_file(),
            on_read_failure: ReadFailurePolicy::default(),
            sensor: SensorConfig::default(),
            thresholds: ThresholdConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cadence(), Duration::from_secs(1));
        assert_eq!(config.log_file, "temperature_log.csv");
        assert_eq!(config.on_read_failure, ReadFailurePolicy::Substitute);
        assert_eq!(config.sensor.device, "/dev/i2c-1");
        assert_eq!(config.sensor.address, 0x48);
        assert!(!config.sensor.simulate);
        assert_eq!(config.thresholds(), Thresholds::new(30.0, 10.0));
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
cadence = 250
on_read_failure = "skip"

[sensor]
address = 0x49
simulate = true

[thresholds]
high = 26.5
step = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.cadence(), Duration::from_millis(250));
        assert_eq!(config.on_read_failure, ReadFailurePolicy::Skip);
        assert_eq!(config.sensor.address, 0x49);
        assert_eq!(config.sensor.device, "/dev/i2c-1");
        assert!(config.sensor.simulate);
        assert_eq!(config.thresholds(), Thresholds::with_step(26.5, 10.0, 0.5));
        assert_eq!(config.log_file, "temperature_log.csv");
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = include_str!("../../../config/default.toml");
        assert_eq!(Config::parse(shipped).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_policy() {
        assert!(Config::parse(r#"on_read_failure = "retry""#).is_err());
    }

    #[test]
    fn test_load_or_default_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::load(dir.path().join("none.toml")).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermo.toml");
        std::fs::write(
            &path,
            "log_file = \"/var/log/temps.csv\"\n[logging]\nfile = \"t.log\"\n",
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_file, "/var/log/temps.csv");
        assert_eq!(config.logging.file.as_deref(), Some("t.log"));
    }
}
