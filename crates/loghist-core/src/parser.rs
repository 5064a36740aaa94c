//! Conversion of raw access-log lines into [`LogEntry`] values.
//!
//! Two fixed layouts are recognised:
//!
//! * ISO style: `2024-01-15 14:03:27` (a `T` separator, fractional seconds and
//!   a trailing `Z` are tolerated), optionally followed by further fields.
//! * Web-log style: `2024 01 15 14 03` (year month day hour minute), optionally
//!   followed by further fields such as a status code.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{AnalyzerError, Result};
use crate::models::{LogEntry, HOURS_PER_DAY};

// ── Patterns ──────────────────────────────────────────────────────────────────

fn iso_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([^-\s]+)-([^-\s]+)-([^-\sT]+)[T ]([^:\s]+):([^:\s]+):([^:\s]+)(?:\s+.*)?$",
        )
        .expect("regex is valid")
    })
}

fn weblog_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)(?:\s+.*)?$").expect("regex is valid")
    })
}

// ── LogLineParser ─────────────────────────────────────────────────────────────

/// Stateless parser for single access-log lines.
pub struct LogLineParser;

impl LogLineParser {
    /// Parse `line` into a [`LogEntry`].
    ///
    /// `line_number` is the 1-based position of the line in its source and is
    /// only used to identify the line in a [`AnalyzerError::MalformedLogLine`].
    pub fn parse(line_number: usize, line: &str) -> Result<LogEntry> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(AnalyzerError::malformed(line_number, line, "empty line"));
        }

        let fields = if let Some(caps) = iso_line().captures(trimmed) {
            let seconds = caps[6].trim_end_matches('Z');
            let whole_seconds = seconds.split('.').next().unwrap_or(seconds);
            Self::number(line_number, line, "second", whole_seconds, 0, 59)?;
            [
                caps[1].to_string(),
                caps[2].to_string(),
                caps[3].to_string(),
                caps[4].to_string(),
                caps[5].to_string(),
            ]
        } else if let Some(caps) = weblog_line().captures(trimmed) {
            [
                caps[1].to_string(),
                caps[2].to_string(),
                caps[3].to_string(),
                caps[4].to_string(),
                caps[5].to_string(),
            ]
        } else {
            return Err(AnalyzerError::malformed(
                line_number,
                line,
                "unrecognised log line format",
            ));
        };

        Self::build_entry(line_number, line, &fields)
    }

    /// `true` when the line holds nothing but whitespace.
    pub fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Validate the five numeric tokens `[year, month, day, hour, minute]`.
    fn build_entry(line_number: usize, line: &str, fields: &[String; 5]) -> Result<LogEntry> {
        let year = Self::number(line_number, line, "year", &fields[0], 0, 9999)? as i32;
        let month = Self::number(line_number, line, "month", &fields[1], 1, 12)?;
        let day = Self::number(line_number, line, "day", &fields[2], 1, 31)?;
        let hour = Self::number(
            line_number,
            line,
            "hour",
            &fields[3],
            0,
            HOURS_PER_DAY as u32 - 1,
        )?;
        let minute = Self::number(line_number, line, "minute", &fields[4], 0, 59)?;

        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(AnalyzerError::malformed(
                line_number,
                line,
                format!("invalid calendar date {:04}-{:02}-{:02}", year, month, day),
            ));
        }

        Ok(LogEntry {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Parse one unsigned token and check it lies within `min..=max`.
    fn number(
        line_number: usize,
        line: &str,
        field: &str,
        token: &str,
        min: u32,
        max: u32,
    ) -> Result<u32> {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AnalyzerError::malformed(
                line_number,
                line,
                format!("non-numeric {} token {:?}", field, token),
            ));
        }
        let value: u32 = token.parse().map_err(|_| {
            AnalyzerError::malformed(
                line_number,
                line,
                format!("{} token {:?} out of range {}-{}", field, token, min, max),
            )
        })?;
        if value < min || value > max {
            return Err(AnalyzerError::malformed(
                line_number,
                line,
                format!("{} {} out of range {}-{}", field, value, min, max),
            ));
        }
        Ok(value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
