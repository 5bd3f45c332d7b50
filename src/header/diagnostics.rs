//! Diagnostics sinks
//!
//! Parsers never reach for a global logger. They receive a `&dyn Diagnostics`
//! and report soft conditions (forward declarations, skipped statements, a
//! trailing line comment) through it. Failed files are reported once per
//! file with [`Diagnostics::parsing_failed`].

use super::error::HeaderError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Receiver of scraper diagnostics
///
/// Implementations must be shareable across threads so one sink can serve a
/// parallel batch.
pub trait Diagnostics: Sync {
    /// Informational message
    fn info(&self, message: &str);

    /// Debug-level message
    fn debug(&self, message: &str);

    /// Recoverable oddity in the input
    fn warning(&self, message: &str);

    /// A whole file failed to parse
    fn parsing_failed(&self, path: &Path, error: &HeaderError);
}

/// Forwards to the `log` crate and appends failures to an error log file
#[derive(Debug, Default)]
pub struct LogDiagnostics {
    error_log: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl LogDiagnostics {
    /// Create a sink without a persistent error log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that appends failed files to `path`
    pub fn with_error_log(path: impl Into<PathBuf>) -> Self {
        Self {
            error_log: Some(path.into()),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the persistent error log, if any
    pub fn error_log(&self) -> Option<&Path> {
        self.error_log.as_deref()
    }

    fn append_failure(&self, log_path: &Path, path: &Path, error: &HeaderError) -> std::io::Result<()> {
        // Poisoning only means another writer panicked mid-line; keep appending.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
        writeln!(file, "Failed to parse {}: {}", path.display(), error)?;
        writeln!(file, "  reproduce with: parse_header on {}", path.display())
    }
}

impl Diagnostics for LogDiagnostics {
    fn info(&self, message: &str) {
        log::info!("{}", message);
    }

    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn warning(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn parsing_failed(&self, path: &Path, error: &HeaderError) {
        log::error!("Failed to parse {}: {}", path.display(), error);
        if let Some(log_path) = &self.error_log {
            if let Err(e) = self.append_failure(log_path, path, error) {
                log::error!("Cannot write error log {}: {}", log_path.display(), e);
            }
        }
    }
}

/// Severity of a collected record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// [`Diagnostics::info`]
    Info,
    /// [`Diagnostics::debug`]
    Debug,
    /// [`Diagnostics::warning`]
    Warning,
    /// [`Diagnostics::parsing_failed`]
    Failure,
}

/// One collected diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Severity of the message
    pub severity: Severity,
    /// Message text
    pub message: String,
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    records: Mutex<Vec<Record>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, severity: Severity, message: String) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Record { severity, message });
    }

    /// Snapshot of all records so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages of the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.severity == severity)
            .map(|r| r.message)
            .collect()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message.to_string());
    }

    fn debug(&self, message: &str) {
        self.push(Severity::Debug, message.to_string());
    }

    fn warning(&self, message: &str) {
        self.push(Severity::Warning, message.to_string());
    }

    fn parsing_failed(&self, path: &Path, error: &HeaderError) {
        self.push(Severity::Failure, format!("{}: {}", path.display(), error));
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn parsing_failed(&self, _path: &Path, _error: &HeaderError) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_by_severity() {
        let diag = CollectingDiagnostics::new();
        diag.info("started");
        diag.debug("forward declaration");
        diag.warning("comment at end of file");
        diag.parsing_failed(
            Path::new("a.h"),
            &HeaderError::UnterminatedComment { position: 0 },
        );

        assert_eq!(diag.records().len(), 4);
        assert_eq!(diag.messages(Severity::Warning), vec!["comment at end of file"]);
        let failures = diag.messages(Severity::Failure);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("a.h: "));
    }

    #[test]
    fn test_log_diagnostics_appends_failures() {
        let log_path = std::env::temp_dir().join(format!(
            "headerscan-diag-{}-{}.log",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_file(&log_path);

        let diag = LogDiagnostics::with_error_log(&log_path);
        let error = HeaderError::MissingKeyword {
            keyword: "class",
            position: 0,
        };
        diag.parsing_failed(Path::new("first.h"), &error);
        diag.parsing_failed(Path::new("second.h"), &error);

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("Failed to parse first.h"));
        assert!(contents.contains("Failed to parse second.h"));
        let _ = std::fs::remove_file(&log_path);
    }
}
