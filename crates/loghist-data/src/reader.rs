//! Sequential, forward-only access to the raw lines of a log file.
//!
//! A [`LogSource`] opens its file at construction and hands out one line at a
//! time through [`LogSource::has_next`] / [`LogSource::next_line`]. It cannot
//! be rewound; build a new source to scan the same file again. The file
//! handle is released when the source is dropped.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use loghist_core::error::{AnalyzerError, Result};
use tracing::{debug, info};

// ── LogSource ─────────────────────────────────────────────────────────────────

/// Lazy cursor over the lines of a log.
pub struct LogSource<R = BufReader<File>> {
    path: PathBuf,
    reader: R,
    /// Raw line read ahead by `has_next` but not yet handed out.
    peeked: Option<std::io::Result<Vec<u8>>>,
    exhausted: bool,
    lines_read: usize,
    /// Consumed lines, kept only when retention is enabled.
    retained: Option<Vec<String>>,
}

impl LogSource<BufReader<File>> {
    /// Open `path` for reading.
    ///
    /// Fails with [`AnalyzerError::SourceUnavailable`] when the file cannot be
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AnalyzerError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Opened log source {}", path.display());
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> LogSource<R> {
    /// Wrap an already-open reader. `path` is only used in diagnostics.
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            peeked: None,
            exhausted: false,
            lines_read: 0,
            retained: None,
        }
    }

    /// Keep every consumed line so it can be replayed with
    /// [`LogSource::write_data`].
    pub fn with_retention(mut self, retain: bool) -> Self {
        self.retained = if retain { Some(Vec::new()) } else { None };
        self
    }

    /// Report whether another line is available without consuming it.
    ///
    /// A read fault also reports `true`; the fault is surfaced by the
    /// following [`LogSource::next_line`].
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_some() {
            return true;
        }
        if self.exhausted {
            return false;
        }
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.exhausted = true;
                debug!(
                    "Log source {} exhausted after {} lines",
                    self.path.display(),
                    self.lines_read
                );
                false
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                self.peeked = Some(Ok(buf));
                true
            }
            Err(e) => {
                self.peeked = Some(Err(e));
                true
            }
        }
    }

    /// Return the next line and advance the cursor.
    ///
    /// Fails with [`AnalyzerError::EndOfSource`] when the source is exhausted
    /// and with [`AnalyzerError::SourceUnavailable`] on a read fault, which
    /// ends the source. A line that is not valid UTF-8 is consumed and
    /// reported as [`AnalyzerError::MalformedLogLine`]; reading continues
    /// with the following line.
    pub fn next_line(&mut self) -> Result<String> {
        if !self.has_next() {
            return Err(AnalyzerError::EndOfSource);
        }
        match self.peeked.take() {
            Some(Ok(bytes)) => {
                self.lines_read += 1;
                let (line, decoded) = match String::from_utf8(bytes) {
                    Ok(line) => (line, true),
                    Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
                };
                if let Some(retained) = self.retained.as_mut() {
                    retained.push(line.clone());
                }
                if decoded {
                    Ok(line)
                } else {
                    Err(AnalyzerError::malformed(self.lines_read, &line, "invalid UTF-8"))
                }
            }
            Some(Err(source)) => {
                self.exhausted = true;
                Err(AnalyzerError::SourceUnavailable {
                    path: self.path.clone(),
                    source,
                })
            }
            None => Err(AnalyzerError::EndOfSource),
        }
    }

    /// Write every retained line, verbatim and in input order, to `out`.
    pub fn write_data<W: Write>(&self, out: &mut W) -> Result<()> {
        let retained = self.retained.as_ref().ok_or_else(|| {
            AnalyzerError::Config(format!(
                "lines of {} were not retained; enable retention to replay them",
                self.path.display()
            ))
        })?;
        for line in retained {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Lines consumed so far, when retention is enabled.
    pub fn retained_lines(&self) -> Option<&[String]> {
        self.retained.as_deref()
    }

    /// Number of lines handed out by [`LogSource::next_line`].
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
