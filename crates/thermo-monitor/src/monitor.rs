//! The sampling control loop.
//!
//! Each tick reads the sensor, records the reading, renders a snapshot,
//! polls for at most one command and dispatches it. Ticks are separated by
//! a fixed cadence. The loop stops only on the quit command.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::dashboard::PresentationSink;
use crate::error::MonitorError;
use crate::persistence::PersistenceSink;
use crate::sensors::{Reading, ReadingSource};
use crate::stats::Statistics;
use crate::terminal::CommandSource;
use crate::thresholds::{AlertState, Thresholds};

/// Value recorded in place of a failed reading under [`ReadFailurePolicy::Substitute`].
pub const SUBSTITUTE_VALUE: f64 = 0.0;

/// Default delay between ticks.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(1000);

/// Minimum spacing between repeated warnings for the same collaborator.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What a tick does when the sensor cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFailurePolicy {
    /// Record [`SUBSTITUTE_VALUE`] as if it had been read.
    #[default]
    Substitute,
    /// Record nothing; show the last good value.
    Skip,
}

impl FromStr for ReadFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substitute" => Ok(ReadFailurePolicy::Substitute),
            "skip" => Ok(ReadFailurePolicy::Skip),
            _ => Err(format!("Invalid read failure policy: {}", s)),
        }
    }
}

impl fmt::Display for ReadFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailurePolicy::Substitute => write!(f, "substitute"),
            ReadFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Everything the presentation sink needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub value: f64,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub high: f64,
    pub low: f64,
    pub alert: AlertState,
    /// False when this tick's sensor read failed.
    pub sensor_ok: bool,
    /// Number of readings in the history.
    pub samples: usize,
}

/// Rate limiter for repeated warnings from one collaborator.
#[derive(Debug, Default)]
struct ErrorThrottle {
    streak: u32,
    suppressed: u32,
    last_log: Option<Instant>,
}

impl ErrorThrottle {
    /// Logs `err` if it starts a streak or the interval has passed since the
    /// last log line. Returns the number of failures that line covers.
    fn record(&mut self, err: &MonitorError, now: Instant) -> Option<u32> {
        self.streak += 1;
        let due = self
            .last_log
            .map_or(true, |at| now.duration_since(at) >= ERROR_LOG_INTERVAL);
        if self.streak > 1 && !due {
            self.suppressed += 1;
            return None;
        }

        let count = self.suppressed + 1;
        if count > 1 {
            warn!(kind = err.kind(), "{} (repeated {} times)", err, count);
        } else {
            warn!(kind = err.kind(), "{}", err);
        }
        self.last_log = Some(now);
        self.suppressed = 0;
        Some(count)
    }

    fn clear(&mut self, kind: &str) {
        if self.streak > 0 {
            info!(kind, "Recovered after {} failed attempts", self.streak);
        }
        self.streak = 0;
        self.suppressed = 0;
    }
}

/// The monitor and everything it owns.
pub struct Monitor {
    source: Box<dyn ReadingSource>,
    sink: Box<dyn PersistenceSink>,
    commands: Box<dyn CommandSource>,
    display: Box<dyn PresentationSink>,
    stats: Statistics,
    thresholds: Thresholds,
    policy: ReadFailurePolicy,
    cadence: Duration,
    state: LoopState,
    last_value: f64,
    source_errors: ErrorThrottle,
    sink_errors: ErrorThrottle,
    input_errors: ErrorThrottle,
}

impl Monitor {
    /// Creates a running monitor with default thresholds, cadence and policy.
    pub fn new(
        source: Box<dyn ReadingSource>,
        sink: Box<dyn PersistenceSink>,
        commands: Box<dyn CommandSource>,
        display: Box<dyn PresentationSink>,
    ) -> Self {
        Self {
            source,
            sink,
            commands,
            display,
            stats: Statistics::new(),
            thresholds: Thresholds::default(),
            policy: ReadFailurePolicy::default(),
            cadence: DEFAULT_CADENCE,
            state: LoopState::Running,
            last_value: SUBSTITUTE_VALUE,
            source_errors: ErrorThrottle::default(),
            sink_errors: ErrorThrottle::default(),
            input_errors: ErrorThrottle::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn with_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs ticks until a quit command is dispatched. Returns the tick count.
    pub async fn run(&mut self) -> u64 {
        info!(
            "Monitoring {} every {:?} (on read failure: {}, threshold step: {})",
            self.source.name(),
            self.cadence,
            self.policy,
            self.thresholds.step()
        );

        let mut ticks = 0;
        loop {
            let state = self.tick();
            ticks += 1;
            if state == LoopState::Stopped {
                break;
            }
            tokio::time::sleep(self.cadence).await;
        }

        info!("Monitor stopped after {} ticks", ticks);
        ticks
    }

    /// Executes one tick and returns the resulting state.
    ///
    /// A stopped monitor does nothing.
    pub fn tick(&mut self) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        let taken_at = Local::now();
        let (value, sensor_ok) = match self.source.read() {
            Ok(value) => {
                self.source_errors.clear("source");
                self.record(Reading::new(value, taken_at));
                self.last_value = value;
                (value, true)
            }
            Err(e) => {
                let err = MonitorError::SourceUnavailable(e);
                self.source_errors.record(&err, Instant::now());
                match self.policy {
                    ReadFailurePolicy::Substitute => {
                        self.record(Reading::new(SUBSTITUTE_VALUE, taken_at));
                        (SUBSTITUTE_VALUE, false)
                    }
                    ReadFailurePolicy::Skip => (self.last_value, false),
                }
            }
        };

        let snapshot = self.snapshot(value, sensor_ok);
        if let Err(e) = self.display.render(&snapshot) {
            debug!("Render failed: {}", e);
        }

        match self.commands.poll_command() {
            Ok(Some(byte)) => {
                self.input_errors.clear("input");
                self.dispatch(Command::from_byte(byte));
            }
            Ok(None) => self.input_errors.clear("input"),
            Err(e) => {
                let err = MonitorError::InputUnavailable(e);
                self.input_errors.record(&err, Instant::now());
            }
        }

        self.state
    }

    /// Appends to the history and the persistence sink.
    fn record(&mut self, reading: Reading) {
        self.stats.append(reading.value);
        match self.sink.append(&reading) {
            Ok(()) => self.sink_errors.clear("sink"),
            Err(e) => {
                let err = MonitorError::SinkUnavailable(e);
                self.sink_errors.record(&err, Instant::now());
            }
        }
    }

    /// Builds the frame for `value` from current state.
    pub fn snapshot(&self, value: f64, sensor_ok: bool) -> Snapshot {
        Snapshot {
            value,
            average: self.stats.average(),
            minimum: self.stats.minimum(),
            maximum: self.stats.maximum(),
            high: self.thresholds.high(),
            low: self.thresholds.low(),
            alert: self.thresholds.classify(value),
            sensor_ok,
            samples: self.stats.len(),
        }
    }

    /// Applies a command to the monitor state.
    pub fn dispatch(&mut self, command: Command) {
        self.apply(command);
    }

    /// Applies a command. Returns true if it moved the high threshold below
    /// the low one, which is warned about once per crossing.
    fn apply(&mut self, command: Command) -> bool {
        let was_inverted = self.thresholds.is_inverted();

        match command {
            Command::RaiseHigh => self.thresholds.raise_high(),
            Command::LowerHigh => self.thresholds.lower_high(),
            Command::RaiseLow => self.thresholds.raise_low(),
            Command::LowerLow => self.thresholds.lower_low(),
            Command::ClearHistory => {
                self.stats.clear();
                if let Err(e) = self.sink.truncate() {
                    let err = MonitorError::SinkUnavailable(e);
                    self.sink_errors.record(&err, Instant::now());
                }
                info!("History cleared");
            }
            Command::Quit => {
                info!("Quit requested");
                self.state = LoopState::Stopped;
            }
            Command::NoOp => return false,
        }

        debug!(
            "{:?}: high={} low={}",
            command,
            self.thresholds.high(),
            self.thresholds.low()
        );
        let crossed = self.thresholds.is_inverted() && !was_inverted;
        if crossed {
            warn!(
                "High threshold {} is now below low threshold {}",
                self.thresholds.high(),
                self.thresholds.low()
            );
        }
        crossed
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
