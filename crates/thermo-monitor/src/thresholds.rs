//! Alert thresholds and reading classification.

use std::fmt;

/// Default high alert threshold in °C.
pub const DEFAULT_HIGH: f64 = 30.0;

/// Default low alert threshold in °C.
pub const DEFAULT_LOW: f64 = 10.0;

/// Default adjustment applied by a single key press.
pub const DEFAULT_STEP: f64 = 1.0;

/// Classification of a reading against the current thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// Reading is strictly above the high threshold.
    High,
    /// Reading is strictly below the low threshold.
    Low,
    /// Anything else, including a reading equal to either threshold.
    Normal,
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertState::High => write!(f, "HIGH TEMPERATURE WARNING!"),
            AlertState::Low => write!(f, "LOW TEMPERATURE WARNING!"),
            AlertState::Normal => write!(f, "Normal"),
        }
    }
}

/// Mutable high/low alert bounds.
///
/// No ordering is enforced between the two bounds; `high` may be moved
/// below `low`. Classification stays total in that case and `High` wins
/// when both conditions hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    high: f64,
    low: f64,
    step: f64,
}

impl Thresholds {
    /// Creates thresholds with the default step.
    pub fn new(high: f64, low: f64) -> Self {
        Self::with_step(high, low, DEFAULT_STEP)
    }

    /// Creates thresholds with a custom adjustment step.
    pub fn with_step(high: f64, low: f64, step: f64) -> Self {
        Self { high, low, step }
    }

    pub fn raise_high(&mut self) {
        self.high += self.step;
    }

    pub fn lower_high(&mut self) {
        self.high -= self.step;
    }

    pub fn raise_low(&mut self) {
        self.low += self.step;
    }

    pub fn lower_low(&mut self) {
        self.low -= self.step;
    }

    /// Classifies a reading. Both thresholds are exclusive.
    pub fn classify(&self, value: f64) -> AlertState {
        if value > self.high {
            AlertState::High
        } else if value < self.low {
            AlertState::Low
        } else {
            AlertState::Normal
        }
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns true if the high threshold has been moved below the low one.
    pub fn is_inverted(&self) -> bool {
        self.high < self.low
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH, DEFAULT_LOW)
    }
}
