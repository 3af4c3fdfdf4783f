//! Full-screen text dashboard.
//!
//! Layout:
//! ```text
//! === Temperature Monitoring System ===
//! Current Temperature: 23.19 °C
//! Alert Status: Normal
//! High Threshold: 30.00 °C
//! Low Threshold: 10.00 °C
//! Statistics (42 samples):
//!   Average: 21.50 °C
//!   Minimum: 18.25 °C
//!   Maximum: 24.00 °C
//!
//! Controls:
//!   h: Increase high threshold
//!   ...
//! ```

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};

use crate::command::Command;
use crate::monitor::Snapshot;

/// Receives one snapshot per tick.
pub trait PresentationSink {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

const TITLE: &str = "=== Temperature Monitoring System ===";

/// Builds the dashboard text, one entry per screen line.
pub fn compose(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = vec![TITLE.to_string()];

    if snapshot.sensor_ok {
        lines.push(format!("Current Temperature: {:.2} °C", snapshot.value));
    } else {
        lines.push(format!("Current Temperature: {:.2} °C (sensor unavailable)", snapshot.value));
    }
    lines.push(format!("Alert Status: {}", snapshot.alert));
    lines.push(format!("High Threshold: {:.2} °C", snapshot.high));
    lines.push(format!("Low Threshold: {:.2} °C", snapshot.low));
    if snapshot.high < snapshot.low {
        lines.push("  (high threshold is below low threshold)".to_string());
    }

    lines.push(format!("Statistics ({} samples):", snapshot.samples));
    lines.push(format!("  Average: {:.2} °C", snapshot.average));
    lines.push(format!("  Minimum: {:.2} °C", snapshot.minimum));
    lines.push(format!("  Maximum: {:.2} °C", snapshot.maximum));

    lines.push(String::new());
    lines.push("Controls:".to_string());
    for command in Command::BOUND {
        if let Some(key) = command.key() {
            lines.push(format!("  {}: {}", key, command));
        }
    }

    lines
}

/// Dashboard writing to any terminal-like output.
pub struct Dashboard<W: Write> {
    out: W,
}

impl Dashboard<Stdout> {
    /// Creates a dashboard on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Dashboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PresentationSink for Dashboard<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // Raw mode disables newline translation, so move the cursor explicitly
        for line in compose(snapshot) {
            queue!(self.out, Print(line), MoveToNextLine(1))?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::AlertState;

    fn snapshot() -> Snapshot {
        Snapshot {
            value: 23.1875,
            average: 21.5,
            minimum: 18.25,
            maximum: 24.0,
            high: 30.0,
            low: 10.0,
            alert: AlertState::Normal,
            sensor_ok: true,
            samples: 42,
        }
    }

    #[test]
    fn test_compose_layout() {
        let lines = compose(&snapshot());
        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[1], "Current Temperature: 23.19 °C");
        assert_eq!(lines[2], "Alert Status: Normal");
        assert_eq!(lines[3], "High Threshold: 30.00 °C");
        assert_eq!(lines[4], "Low Threshold: 10.00 °C");
        assert_eq!(lines[5], "Statistics (42 samples):");
        assert_eq!(lines[6], "  Average: 21.50 °C");
        assert_eq!(lines[7], "  Minimum: 18.25 °C");
        assert_eq!(lines[8], "  Maximum: 24.00 °C");
        assert!(lines.contains(&"  h: Increase high threshold".to_string()));
        assert!(lines.contains(&"  L: Decrease low threshold".to_string()));
        assert_eq!(lines.last().unwrap(), "  q: Quit");
    }

    #[test]
    fn test_compose_alerts() {
        let mut s = snapshot();
        s.alert = AlertState::High;
        assert!(compose(&s).contains(&"Alert Status: HIGH TEMPERATURE WARNING!".to_string()));
        s.alert = AlertState::Low;
        assert!(compose(&s).contains(&"Alert Status: LOW TEMPERATURE WARNING!".to_string()));
    }

    #[test]
    fn test_compose_sensor_unavailable() {
        let mut s = snapshot();
        s.value = 0.0;
        s.sensor_ok = false;
        assert_eq!(
            compose(&s)[1],
            "Current Temperature: 0.00 °C (sensor unavailable)"
        );
    }

    #[test]
    fn test_compose_inverted_thresholds() {
        let mut s = snapshot();
        s.high = 5.0;
        s.low = 15.0;
        let lines = compose(&s);
        assert_eq!(lines[5], "  (high threshold is below low threshold)");
    }

    #[test]
    fn test_render_writes_screen() {
        let mut buf = Vec::new();
        Dashboard::new(&mut buf).render(&snapshot()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        // Cursor home and clear precede the text
        assert!(out.starts_with("\u{1b}[1;1H\u{1b}[2J"));
        assert!(out.contains(TITLE));
        assert!(out.contains("Current Temperature: 23.19 °C"));
    }
}
