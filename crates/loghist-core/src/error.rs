use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while reading and analysing an access log.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The log file could not be opened or read from disk.
    #[error("Log source unavailable {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not match any recognised log-line format.
    #[error("Malformed log line {line_number} ({reason}): {line:?}")]
    MalformedLogLine {
        /// 1-based position of the line within its source.
        line_number: usize,
        line: String,
        reason: String,
    },

    /// `next_line` was called on a source that had no more lines.
    #[error("Log source exhausted: next_line called after has_next returned false")]
    EndOfSource,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Build a [`AnalyzerError::MalformedLogLine`] for `line`.
    pub fn malformed(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        AnalyzerError::MalformedLogLine {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// `true` for errors caused by the log data rather than by I/O or the caller.
    pub fn is_data_error(&self) -> bool {
        matches!(self, AnalyzerError::MalformedLogLine { .. })
    }
}

/// Convenience alias used throughout the loghist crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
