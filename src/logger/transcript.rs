//! JSONL invocation transcript: one self-contained JSON object per line.
//!
//! A transcript belongs to one mock. Opening it truncates the file, and each
//! line goes to the file in a single unbuffered `write_all` on an append-mode
//! handle, so a reader never sees a partial line.
//!
//! The size cap is checked against the file's current length on disk, not a
//! per-writer counter. Lines that would push the file past the cap are
//! counted and dropped. If the file cannot be opened the writer falls back
//! to stderr with a `[UDY-TRANSCRIPT]` prefix; a mock never fails a test
//! because logging failed.

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::config::TranscriptConfig;
use crate::core::errors::{Result, UnderstudyError};

/// Transcript event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptEvent {
    Register,
    Invoke,
    Raise,
    Unmatched,
    Error,
}

/// A single transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: TranscriptEvent,
    /// Call name.
    pub call: String,
    /// Rendered argument slots (pattern for `register`).
    pub args: Vec<String>,
    /// Behavior index that ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    /// Rendered result slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TranscriptEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: TranscriptEvent, call: &str, args: Vec<String>) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            call: call.to_string(),
            args,
            cursor: None,
            results: None,
            error_code: None,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub fn with_results(mut self, results: Vec<String>) -> Self {
        self.results = Some(results);
        self
    }

    #[must_use]
    pub fn with_error(mut self, err: &UnderstudyError) -> Self {
        self.error_code = Some(err.code().to_string());
        self.error_message = Some(err.to_string());
        self
    }
}

#[derive(Debug)]
enum Sink {
    File(File),
    Stderr,
    Closed,
}

/// Transcript writer for a single mock.
#[derive(Debug)]
pub struct TranscriptWriter {
    max_size_bytes: u64,
    include_results: bool,
    sink: Sink,
    lines_written: u64,
    lines_dropped: u64,
}

impl TranscriptWriter {
    /// Create (or truncate) the transcript file. Without a usable path the
    /// writer reports to stderr instead.
    pub fn open(config: &TranscriptConfig) -> Self {
        let sink = match config.path.as_deref().map(create_truncated) {
            Some(Ok(file)) => Sink::File(file),
            Some(Err(err)) => {
                let _ = writeln!(io::stderr(), "[UDY-TRANSCRIPT] {err}, using stderr");
                Sink::Stderr
            }
            None => {
                let _ = writeln!(
                    io::stderr(),
                    "[UDY-TRANSCRIPT] no transcript.path configured, using stderr"
                );
                Sink::Stderr
            }
        };
        Self {
            max_size_bytes: config.max_size_bytes,
            include_results: config.include_results,
            sink,
            lines_written: 0,
            lines_dropped: 0,
        }
    }

    /// Whether `invoke` lines should carry rendered results.
    #[must_use]
    pub const fn include_results(&self) -> bool {
        self.include_results
    }

    /// Write a single entry as one JSONL line.
    pub fn write_entry(&mut self, entry: &TranscriptEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let err = UnderstudyError::from(e);
                let _ = writeln!(io::stderr(), "[UDY-TRANSCRIPT] {err}");
                return;
            }
        };
        self.write_line(&line);
    }

    pub fn flush(&mut self) {
        if let Sink::File(file) = &mut self.sink {
            let _ = file.flush();
        }
    }

    /// Where lines currently go.
    pub fn state(&self) -> &str {
        match self.sink {
            Sink::File(_) => "file",
            Sink::Stderr => "stderr",
            Sink::Closed => "closed",
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Lines refused because the file had reached `max_size_bytes`.
    pub fn lines_dropped(&self) -> u64 {
        self.lines_dropped
    }

    fn write_line(&mut self, line: &str) {
        match &mut self.sink {
            Sink::File(file) => {
                let current = file.metadata().map_or(0, |meta| meta.len());
                if current + line.len() as u64 > self.max_size_bytes {
                    self.lines_dropped += 1;
                    return;
                }
                if let Err(err) = file.write_all(line.as_bytes()) {
                    let _ = writeln!(
                        io::stderr(),
                        "[UDY-TRANSCRIPT] write failed ({err}), transcript closed"
                    );
                    self.sink = Sink::Closed;
                    return;
                }
            }
            Sink::Stderr => {
                let _ = write!(io::stderr(), "[UDY-TRANSCRIPT] {line}");
            }
            Sink::Closed => return,
        }
        self.lines_written += 1;
    }
}

/// Create the parent directory, truncate the file, and reopen it for appends.
fn create_truncated(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| UnderstudyError::io(parent, source))?;
    }
    File::create(path).map_err(|source| UnderstudyError::io(path, source))?;
    OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| UnderstudyError::io(path, source))
}

fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ──────────────────────── tests ────────────────────────
