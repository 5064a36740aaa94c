//! Main analysis pipeline for loghist.
//!
//! Opens a log file, runs one aggregation pass and returns an
//! [`AnalysisResult`] ready for printing.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::Utc;
use loghist_core::error::Result;
use loghist_core::models::{MalformedPolicy, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::HourlyAggregator;
use crate::reader::LogSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Aggregate figures for one analysed log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Path of the analysed log file.
    pub source: String,
    /// ISO-8601 timestamp when this summary was generated.
    pub generated_at: String,
    pub policy: MalformedPolicy,
    pub lines_read: usize,
    pub total_accesses: u64,
    pub skipped_lines: u64,
    pub busiest_hour: usize,
    pub quietest_hour: usize,
    pub hour_counts: [u64; HOURS_PER_DAY],
}

/// The complete output of [`analyze_file`].
pub struct AnalysisResult {
    /// The aggregator after its pass; still holds the source for replay.
    pub aggregator: HourlyAggregator<BufReader<File>>,
    pub summary: AnalysisSummary,
    /// Wall-clock seconds spent in the aggregation pass.
    pub analysis_time_seconds: f64,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Build the summary for an aggregator's current state.
pub fn summarize<R: std::io::BufRead>(aggregator: &HourlyAggregator<R>) -> AnalysisSummary {
    AnalysisSummary {
        source: aggregator.source().path().display().to_string(),
        generated_at: Utc::now().to_rfc3339(),
        policy: aggregator.policy(),
        lines_read: aggregator.source().lines_read(),
        total_accesses: aggregator.number_of_accesses(),
        skipped_lines: aggregator.skipped_lines(),
        busiest_hour: aggregator.busiest_hour(),
        quietest_hour: aggregator.quietest_hour(),
        hour_counts: *aggregator.hour_counts(),
    }
}

/// Run the full pipeline over the log at `path`.
///
/// 1. Open the file (retaining raw lines when `retain_lines` is set).
/// 2. Aggregate every line under `policy`.
/// 3. Return the aggregator together with its [`AnalysisSummary`].
pub fn analyze_file(
    path: impl AsRef<Path>,
    policy: MalformedPolicy,
    retain_lines: bool,
) -> Result<AnalysisResult> {
    let source = LogSource::open(path)?.with_retention(retain_lines);
    let mut aggregator = HourlyAggregator::new(source).with_policy(policy);

    let start = std::time::Instant::now();
    aggregator.analyze_hourly_data()?;
    let analysis_time_seconds = start.elapsed().as_secs_f64();

    let summary = summarize(&aggregator);
    info!(
        "Analysed {} lines from {}: {} accesses, {} skipped",
        summary.lines_read, summary.source, summary.total_accesses, summary.skipped_lines
    );

    Ok(AnalysisResult {
        aggregator,
        summary,
        analysis_time_seconds,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
