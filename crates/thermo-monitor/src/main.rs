//! Thermo Monitor
//!
//! Interactive terminal temperature monitor for a TMP102 sensor.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use thermo_hw::Tmp102;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use thermo_monitor::config::Config;
use thermo_monitor::dashboard::Dashboard;
use thermo_monitor::monitor::{Monitor, ReadFailurePolicy};
use thermo_monitor::persistence::CsvLog;
use thermo_monitor::sensors::{ReadingSource, SimulatedSensor};
use thermo_monitor::terminal::{self, TerminalGuard};

/// Configuration file used when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "thermomon")]
#[command(about = "Interactive TMP102 temperature monitor")]
#[command(version)]
struct Cli {
    /// Configuration file (default: config/default.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use the simulated sensor instead of the I2C bus
    #[arg(long)]
    simulate: bool,

    /// CSV file receiving the readings
    #[arg(long)]
    log_file: Option<String>,

    /// What to do when the sensor cannot be read: substitute, skip
    #[arg(long)]
    on_read_failure: Option<ReadFailurePolicy>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)
            .context("Failed to load configuration")?,
    };
    if cli.simulate {
        config.sensor.simulate = true;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    if let Some(policy) = cli.on_read_failure {
        config.on_read_failure = policy;
    }

    init_logging(&config, cli.verbose)?;

    let source = open_source(&config)?;

    // A missing log file is not fatal; appends keep retrying every tick
    let log = match CsvLog::open(&config.log_file) {
        Ok(log) => log,
        Err(e) => {
            warn!(
                "Could not open log file {}: {}. Continuing without it.",
                config.log_file, e
            );
            CsvLog::new(&config.log_file)
        }
    };

    terminal::install_panic_hook();
    let input = TerminalGuard::enter().context("Failed to set up terminal")?;

    let mut monitor = Monitor::new(
        source,
        Box::new(log),
        Box::new(input),
        Box::new(Dashboard::stdout()),
    )
    .with_thresholds(config.thresholds())
    .with_cadence(config.cadence())
    .with_failure_policy(config.on_read_failure);

    monitor.run().await;

    let stats = monitor.stats().clone();
    // Restores the terminal
    drop(monitor);

    println!(
        "Recorded {} readings (average {:.2} °C, minimum {:.2} °C, maximum {:.2} °C)",
        stats.len(),
        stats.average(),
        stats.minimum(),
        stats.maximum()
    );
    Ok(())
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env().add_directive(level.parse()?);

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(terminal::diagnostic_writer)
                .init();
        }
    }
    Ok(())
}

fn open_source(config: &Config) -> Result<Box<dyn ReadingSource>> {
    if config.sensor.simulate {
        info!("Using simulated sensor");
        return Ok(Box::new(SimulatedSensor::default()));
    }

    let sensor = Tmp102::open(
        &config.sensor.device,
        config.sensor.address,
        config.sensor_timeout(),
    )
    .context("Failed to open temperature sensor (use --simulate to run without hardware)")?;
    Ok(Box::new(sensor))
}
