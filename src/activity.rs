//! Activity logging for history scans and alias generation.
//!
//! Collaborators receive a `&mut dyn ActivityLog` instead of writing to a
//! global logger, so library code and tests stay free of side effects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
}

/// A single log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }
}

/// Sink for activity messages.
///
/// Recording never fails from the caller's point of view.
pub trait ActivityLog {
    fn record(&mut self, level: Level, message: &str);

    fn debug(&mut self, message: &str) {
        self.record(Level::Debug, message);
    }

    fn info(&mut self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message);
    }
}

/// Appends JSON lines to a file.
pub struct FileLog {
    file: File,
}

impl FileLog {
    /// Open or create a log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write one entry to the log.
    pub fn write_entry(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }
}

impl ActivityLog for FileLog {
    fn record(&mut self, level: Level, message: &str) {
        let _ = self.write_entry(&LogEntry::new(level, message));
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullLog;

impl ActivityLog for NullLog {
    fn record(&mut self, _level: Level, _message: &str) {}
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    pub entries: Vec<LogEntry>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any entry's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }
}

impl ActivityLog for MemoryLog {
    fn record(&mut self, level: Level, message: &str) {
        self.entries.push(LogEntry::new(level, message));
    }
}
