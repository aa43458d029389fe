//! Textual event traces
//!
//! A trace is a sequence of lines `TIMESTAMP: CONTENT`, where the content is
//! the concatenated rendering of every event of one log entry. Traces are
//! what the merger consumes, so they can come from a file written by an
//! earlier run or straight from an [`EventLog`](crate::event_log::EventLog).

use crate::event_log::LogEntry;
use crate::types::{parse_timestamp, timestamp_prefix, MinerError, Result, Timestamp};
use regex::Regex;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Separator between timestamp and content
pub const TRACE_SEPARATOR: &str = ": ";

/// Interval annotation of a scalar rendering, e.g. `(10-14), `
static INTERVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([\d.]+-[\d.]+\), ").expect("Invalid interval regex pattern")
});

/// One line of a textual trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Raw timestamp, possibly longer than the fixed layout
    pub timestamp: String,
    /// Rendered events
    pub content: String,
}

impl TraceEntry {
    pub fn new(timestamp: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            content: content.into(),
        }
    }

    /// Split a trace line at its first `": "`
    ///
    /// `line_no` is only used for error reporting.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let (timestamp, content) =
            line.split_once(TRACE_SEPARATOR)
                .ok_or_else(|| MinerError::MalformedTraceLine {
                    line: line_no,
                    content: line.to_string(),
                })?;
        Ok(Self::new(timestamp, content))
    }

    /// Whether the timestamp carries a date component
    pub fn has_date(&self) -> bool {
        self.timestamp.contains(' ')
    }

    /// Copy of this entry with `date` prefixed to its timestamp
    pub fn with_date(&self, date: &str) -> Self {
        Self::new(format!("{} {}", date, self.timestamp), self.content.clone())
    }

    /// Parse the fixed-width timestamp prefix
    pub fn instant(&self) -> Result<Timestamp> {
        parse_timestamp(&self.timestamp)
    }

    /// `TIMESTAMP: CONTENT`, timestamp truncated to the fixed layout
    pub fn to_text_line(&self) -> String {
        format!(
            "{}{}{}\n",
            timestamp_prefix(&self.timestamp),
            TRACE_SEPARATOR,
            self.content
        )
    }

    /// CSV form: the first two spaces of the content become field separators
    /// and the first interval annotation is dropped
    pub fn to_csv_line(&self) -> String {
        let fields = self.content.replacen(' ', ",", 2);
        format!(
            "{},{}\n",
            timestamp_prefix(&self.timestamp),
            strip_interval(&fields)
        )
    }
}

impl From<&LogEntry> for TraceEntry {
    fn from(entry: &LogEntry) -> Self {
        Self::new(entry.timestamp(), entry.content())
    }
}

/// Replace the first interval annotation with a bare `", "`
pub fn strip_interval(content: &str) -> String {
    INTERVAL_RE.replace(content, ", ").into_owned()
}

/// Parse a whole trace document; blank lines are skipped
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| TraceEntry::parse_line(line, i + 1))
        .collect()
}

/// Read a trace file
pub fn read_trace(path: &Path) -> Result<Vec<TraceEntry>> {
    log::info!("Reading trace: {:?}", path);
    let text = fs::read_to_string(path)?;
    let entries = parse_trace(&text)?;
    log::debug!("{} entries read from {:?}", entries.len(), path);
    Ok(entries)
}

/// Write entries as text lines
pub fn write_trace_text(path: &Path, entries: &[TraceEntry]) -> Result<()> {
    write_lines(path, entries.iter().map(TraceEntry::to_text_line))
}

/// Write entries as CSV lines
pub fn write_trace_csv(path: &Path, entries: &[TraceEntry]) -> Result<()> {
    write_lines(path, entries.iter().map(TraceEntry::to_csv_line))
}

pub(crate) fn write_lines<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut out = BufWriter::new(fs::File::create(path)?);
    for line in lines {
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;
    log::info!("Wrote {:?}", path);
    Ok(())
}
