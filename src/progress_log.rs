//! Append-only progress log.
//!
//! Each phase boundary appends one `YYYY-MM-DD HH:MM:SS, <message>` line.
//! The file is opened and closed per line so that lines written before a
//! failure are already on disk.

use crate::error::{EtlError, Result};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Timestamp layout used at the start of every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Phase boundaries recorded in the progress log, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    JobStarted,
    ExtractStarted,
    ExtractEnded,
    TransformStarted,
    TransformEnded,
    LoadStarted,
    LoadEnded,
    JobEnded,
}

impl ProgressEvent {
    /// Every event of a successful run, in order
    pub const RUN_ORDER: [ProgressEvent; 8] = [
        ProgressEvent::JobStarted,
        ProgressEvent::ExtractStarted,
        ProgressEvent::ExtractEnded,
        ProgressEvent::TransformStarted,
        ProgressEvent::TransformEnded,
        ProgressEvent::LoadStarted,
        ProgressEvent::LoadEnded,
        ProgressEvent::JobEnded,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            ProgressEvent::JobStarted => "ETL Job Started",
            ProgressEvent::ExtractStarted => "Extract phase Started",
            ProgressEvent::ExtractEnded => "Extract phase Ended",
            ProgressEvent::TransformStarted => "Transform phase Started",
            ProgressEvent::TransformEnded => "Transform phase Ended",
            ProgressEvent::LoadStarted => "Load phase Started",
            ProgressEvent::LoadEnded => "Load phase Ended",
            ProgressEvent::JobEnded => "ETL Job Ended",
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Appends timestamped lines to a log file
#[derive(Debug, Clone)]
pub struct ProgressLogger {
    path: PathBuf,
}

impl ProgressLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a phase boundary
    pub fn record(&self, event: ProgressEvent) -> Result<()> {
        self.log(event.message())
    }

    /// Append a single line with the current local time
    pub fn log(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let line = format!("{}, {}\n", timestamp, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| EtlError::io_failure(&self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| EtlError::io_failure(&self.path, e))?;

        debug!("Progress: {}", message);
        Ok(())
    }
}
