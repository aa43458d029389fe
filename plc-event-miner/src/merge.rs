//! Chronological merge of event traces
//!
//! Traces produced independently (typically one from readings and one from
//! messages) are concatenated and re-sorted by their parsed timestamps. The
//! readings trace of some captures only carries a time of day, so the first
//! trace can be completed with a calendar date before sorting.

use crate::formats::trace_text::{write_trace_csv, write_trace_text, TraceEntry};
use crate::types::{Result, Timestamp};
use std::path::Path;

/// Merges traces into one chronological trace
#[derive(Debug, Clone, Default)]
pub struct LogMerger {
    patch_date: Option<String>,
}

impl LogMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: date to prefix to the first trace when it lacks one
    pub fn with_patch_date(mut self, date: impl Into<String>) -> Self {
        self.patch_date = Some(date.into());
        self
    }

    /// Merge `traces` into a single chronological trace
    ///
    /// Only the first trace is date-patched, and only if its first entry has
    /// no date component. Every timestamp is parsed before sorting, so a
    /// malformed one fails the merge regardless of where it sits. Entries
    /// sharing an instant have no guaranteed order.
    pub fn merge(&self, traces: &[&[TraceEntry]]) -> Result<MergedTrace> {
        let total = traces.iter().map(|t| t.len()).sum();
        let mut timed: Vec<(Timestamp, TraceEntry)> = Vec::with_capacity(total);

        for (i, trace) in traces.iter().enumerate() {
            let patch = match (&self.patch_date, trace.first()) {
                (Some(date), Some(first)) if i == 0 && !first.has_date() => Some(date.as_str()),
                _ => None,
            };
            if let Some(date) = patch {
                log::info!("Patching {} entries with date {}", trace.len(), date);
            }

            for entry in trace.iter() {
                let entry = match patch {
                    Some(date) => entry.with_date(date),
                    None => entry.clone(),
                };
                timed.push((entry.instant()?, entry));
            }
        }

        timed.sort_by_key(|(instant, _)| *instant);
        log::info!("Merged {} traces into {} entries", traces.len(), timed.len());

        Ok(MergedTrace {
            entries: timed.into_iter().map(|(_, entry)| entry).collect(),
        })
    }
}

/// A chronologically ordered trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTrace {
    entries: Vec<TraceEntry>,
}

impl MergedTrace {
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render_text(&self) -> String {
        self.entries.iter().map(TraceEntry::to_text_line).collect()
    }

    pub fn render_csv(&self) -> String {
        self.entries.iter().map(TraceEntry::to_csv_line).collect()
    }

    pub fn write_text(&self, path: &Path) -> Result<()> {
        write_trace_text(path, &self.entries)
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        write_trace_csv(path, &self.entries)
    }
}
