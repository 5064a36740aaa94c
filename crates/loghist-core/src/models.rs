use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyzerError;

/// Number of hour-of-day buckets in a histogram.
pub const HOURS_PER_DAY: usize = 24;

/// Log file read when no path is given.
pub const DEFAULT_LOG_FILE: &str = "demo.log";

/// A single access record parsed from one log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub year: i32,
    /// Month of the year, 1–12.
    pub month: u32,
    /// Day of the month, 1–31.
    pub day: u32,
    /// Hour of the day, 0–23. The only field the aggregator consumes.
    pub hour: u32,
    /// Minute of the hour, 0–59.
    #[serde(default)]
    pub minute: u32,
}

impl LogEntry {
    /// The histogram bucket this entry falls into.
    pub fn hour_index(&self) -> usize {
        self.hour as usize
    }
}

/// What the aggregator does with a line that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the analysis pass with the parse error.
    #[default]
    Strict,
    /// Log a warning, count the line as skipped and carry on.
    Skip,
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPolicy::Strict => write!(f, "strict"),
            MalformedPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for MalformedPolicy {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(MalformedPolicy::Strict),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(AnalyzerError::Config(format!(
                "unknown malformed-line policy: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hour: u32) -> LogEntry {
        LogEntry {
            year: 2024,
            month: 1,
            day: 15,
            hour,
            minute: 5,
        }
    }

    #[test]
    fn test_hour_index() {
        assert_eq!(entry(0).hour_index(), 0);
        assert_eq!(entry(23).hour_index(), 23);
    }

    #[test]
    fn test_log_entry_serde_minute_defaults() {
        let parsed: LogEntry =
            serde_json::from_str(r#"{"year":2024,"month":3,"day":1,"hour":4}"#).unwrap();
        assert_eq!(parsed.minute, 0);
        assert_eq!(parsed.hour, 4);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Strict);
        assert_eq!("SKIP".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Skip);
        assert!("lenient".parse::<MalformedPolicy>().is_err());
    }

    #[test]
    fn test_policy_default_is_strict() {
        assert_eq!(MalformedPolicy::default(), MalformedPolicy::Strict);
    }

    #[test]
    fn test_policy_serde_lowercase() {
        let json = serde_json::to_string(&MalformedPolicy::Skip).unwrap();
        assert_eq!(json, "\"skip\"");
    }
}
