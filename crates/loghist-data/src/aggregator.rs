//! Hour-of-day aggregation over a [`LogSource`].

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use loghist_core::error::{AnalyzerError, Result};
use loghist_core::formatting::format_hourly_counts;
use loghist_core::models::{MalformedPolicy, DEFAULT_LOG_FILE, HOURS_PER_DAY};
use loghist_core::parser::LogLineParser;
use tracing::{debug, warn};

use crate::histogram::HourlyHistogram;
use crate::reader::LogSource;

// ── HourlyAggregator ──────────────────────────────────────────────────────────

/// Counts accesses per hour of day from the lines of one [`LogSource`].
///
/// The histogram is cumulative: it is never reset, and each aggregator owns
/// its source exclusively.
pub struct HourlyAggregator<R = BufReader<File>> {
    histogram: HourlyHistogram,
    source: LogSource<R>,
    policy: MalformedPolicy,
    skipped_lines: u64,
}

impl HourlyAggregator<BufReader<File>> {
    /// Aggregator over the file at `path`, with strict parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(LogSource::open(path)?))
    }

    /// Aggregator over `demo.log` in the working directory.
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_LOG_FILE)
    }
}

impl<R: BufRead> HourlyAggregator<R> {
    pub fn new(source: LogSource<R>) -> Self {
        Self {
            histogram: HourlyHistogram::new(),
            source,
            policy: MalformedPolicy::default(),
            skipped_lines: 0,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Drain the source, counting every parsed entry into its hour bucket.
    ///
    /// Blank lines are ignored. Under [`MalformedPolicy::Strict`] the first
    /// unparseable line aborts the pass with
    /// [`AnalyzerError::MalformedLogLine`]; counts recorded before it are
    /// kept. Under [`MalformedPolicy::Skip`] such lines are counted in
    /// [`HourlyAggregator::skipped_lines`] instead. A read fault ends the pass
    /// with [`AnalyzerError::SourceUnavailable`]. Calling this again on an
    /// exhausted source does nothing.
    pub fn analyze_hourly_data(&mut self) -> Result<()> {
        let mut recorded = 0u64;
        let mut skipped = 0u64;

        while self.source.has_next() {
            let outcome = self
                .source
                .next_line()
                .and_then(|line| self.record_line(&line));

            match outcome {
                Ok(true) => recorded += 1,
                Ok(false) => {}
                Err(err) if err.is_data_error() && self.policy == MalformedPolicy::Skip => {
                    warn!("Skipping {}", err);
                    self.skipped_lines += 1;
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            "Source {}: {} lines read, {} recorded, {} skipped",
            self.source.path().display(),
            self.source.lines_read(),
            recorded,
            skipped,
        );
        Ok(())
    }

    /// Parse one line and count it. Returns `false` for blank lines.
    fn record_line(&mut self, line: &str) -> Result<bool> {
        if LogLineParser::is_blank(line) {
            return Ok(false);
        }
        let line_number = self.source.lines_read();
        let entry = LogLineParser::parse(line_number, line)?;
        self.histogram
            .record(&entry)
            .map(|_| true)
            .ok_or_else(|| AnalyzerError::malformed(line_number, line, "hour out of range 0-23"))
    }

    /// Total accesses across all hours.
    pub fn number_of_accesses(&self) -> u64 {
        self.histogram.total()
    }

    /// Hour with the most accesses; the earliest hour wins ties.
    pub fn busiest_hour(&self) -> usize {
        self.histogram.busiest_hour()
    }

    /// Hour with the fewest accesses; the earliest hour wins ties.
    pub fn quietest_hour(&self) -> usize {
        self.histogram.quietest_hour()
    }

    /// Malformed lines skipped under [`MalformedPolicy::Skip`].
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn hour_counts(&self) -> &[u64; HOURS_PER_DAY] {
        self.histogram.counts()
    }

    pub fn source(&self) -> &LogSource<R> {
        &self.source
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    /// Write the `Hr: Count` table to `out`.
    pub fn write_hourly_counts<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(format_hourly_counts(self.histogram.counts()).as_bytes())?;
        Ok(())
    }

    /// Print the `Hr: Count` table to stdout.
    pub fn print_hourly_counts(&self) -> Result<()> {
        self.write_hourly_counts(&mut std::io::stdout().lock())
    }

    /// Write the raw lines read so far to `out`. Requires a source opened
    /// with retention enabled.
    pub fn write_data<W: Write>(&self, out: &mut W) -> Result<()> {
        self.source.write_data(out)
    }

    /// Print the raw lines read so far to stdout.
    pub fn print_data(&self) -> Result<()> {
        self.write_data(&mut std::io::stdout().lock())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
