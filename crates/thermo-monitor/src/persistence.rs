//! Append-only CSV reading log.
//!
//! One record per line: `YYYY-MM-DD HH:MM:SS,value`.

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::sensors::Reading;

/// Local timestamp layout for log records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "temperature_log.csv";

/// Durable store for accepted readings.
pub trait PersistenceSink {
    /// Appends one reading.
    fn append(&mut self, reading: &Reading) -> io::Result<()>;

    /// Discards every stored reading.
    fn truncate(&mut self) -> io::Result<()>;
}

/// Formats a single log record, including the trailing newline.
pub fn format_record(taken_at: &DateTime<Local>, value: f64) -> String {
    format!("{},{}\n", taken_at.format(TIMESTAMP_FORMAT), value)
}

/// CSV file sink.
///
/// The file is opened lazily in append mode and reopened on the next
/// append after a failed write.
pub struct CsvLog {
    path: PathBuf,
    file: Option<File>,
}

impl CsvLog {
    /// Creates a sink for `path` without touching the filesystem.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
        }
    }

    /// Creates a sink and opens the file immediately.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut log = Self::new(path);
        log.file()?;
        info!("Logging readings to {}", log.path.display());
        Ok(log)
    }

    /// Returns the log path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            debug!("Opened {}", self.path.display());
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file not open"))
    }
}

impl PersistenceSink for CsvLog {
    fn append(&mut self, reading: &Reading) -> io::Result<()> {
        let record = format_record(&reading.taken_at, reading.value);
        let result = self.file()?.write_all(record.as_bytes());
        if result.is_err() {
            self.file = None;
        }
        result
    }

    fn truncate(&mut self) -> io::Result<()> {
        self.file = None;
        File::create(&self.path)?;
        info!("Truncated {}", self.path.display());
        Ok(())
    }
}
