//! Core types for loghist: log entries, line parsing, errors, settings and
//! output formatting.

pub mod error;
pub mod formatting;
pub mod models;
pub mod parser;
pub mod settings;

pub use error::{AnalyzerError, Result};
pub use models::{LogEntry, MalformedPolicy};
pub use parser::LogLineParser;
