//! Event logs
//!
//! A log is the sparse output of one mining pass: one [`LogEntry`] per row
//! that produced at least one event, in row order.

use crate::formats::trace_text::{write_lines, TraceEntry};
use crate::types::{PlcEvent, Result};
use std::path::Path;

/// All events detected while processing one row
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    timestamp: String,
    events: Vec<PlcEvent>,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: PlcEvent) {
        self.events.push(event);
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn events(&self) -> &[PlcEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Concatenated text renderings of the events
    pub fn content(&self) -> String {
        let mut buf = String::new();
        for event in &self.events {
            event.append_text(&mut buf);
        }
        buf
    }

    /// `TIMESTAMP: EVENT, EVENT, \n`
    pub fn to_text_line(&self) -> String {
        format!("{}: {}\n", self.timestamp, self.content())
    }

    /// `TIMESTAMP,kind,device,rendering...\n` using the per-event CSV form
    pub fn to_csv_line(&self) -> String {
        let mut buf = self.timestamp.clone();
        for event in &self.events {
            event.append_csv(&mut buf);
        }
        buf.push('\n');
        buf
    }
}

/// Ordered, sparse sequence of log entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of events across all entries
    pub fn event_count(&self) -> usize {
        self.entries.iter().map(|e| e.events().len()).sum()
    }

    /// Textual trace of this log, ready for merging
    pub fn to_trace(&self) -> Vec<TraceEntry> {
        self.entries.iter().map(TraceEntry::from).collect()
    }

    /// Whole log in the text format
    pub fn render_text(&self) -> String {
        self.entries.iter().map(LogEntry::to_text_line).collect()
    }

    /// Whole log in the CSV format
    pub fn render_csv(&self) -> String {
        self.entries.iter().map(LogEntry::to_csv_line).collect()
    }

    pub fn write_text(&self, path: &Path) -> Result<()> {
        write_lines(path, self.entries.iter().map(LogEntry::to_text_line))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        write_lines(path, self.entries.iter().map(LogEntry::to_csv_line))
    }
}

impl IntoIterator for EventLog {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Groups the events of each processed row into log entries
#[derive(Debug, Default)]
pub struct EventLogBuilder {
    entries: Vec<LogEntry>,
}

impl EventLogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one row; rows without events leave no entry
    pub fn push_row(&mut self, timestamp: &str, events: Vec<PlcEvent>) {
        if events.is_empty() {
            return;
        }
        log::trace!("{}: {} event(s)", timestamp, events.len());
        self.entries.push(LogEntry {
            timestamp: timestamp.to_string(),
            events,
        });
    }

    pub fn finish(self) -> EventLog {
        EventLog {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn flip(field: &str, from: &str, to: &str) -> PlcEvent {
        PlcEvent::Boolean {
            field: field.to_string(),
            previous: from.to_string(),
            current: to.to_string(),
        }
    }

    #[test]
    fn test_builder_drops_empty_rows() {
        let mut builder = EventLogBuilder::new();
        builder.push_row("t0", vec![]);
        builder.push_row("t1", vec![flip("PLC1_A", "0", "1")]);
        builder.push_row("t2", vec![]);
        let log = builder.finish();

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].timestamp(), "t1");
        assert!(log.entries().iter().all(|e| !e.is_empty()));
    }

    #[test]
    fn test_entry_renderings() {
        let mut builder = EventLogBuilder::new();
        builder.push_row(
            "2022-03-23 10:00:00.000",
            vec![
                flip("PLC1_A", "0", "1"),
                PlcEvent::Scalar {
                    field: "PLC2_Level".to_string(),
                    previous_trend: Trend::Ascending,
                    current_trend: Trend::Stable,
                    initial_value: "3".to_string(),
                    final_value: "5".to_string(),
                },
            ],
        );
        let log = builder.finish();

        assert_eq!(
            log.render_text(),
            "2022-03-23 10:00:00.000: s PLC1 PLC1_A [0->1], s PLC2 PLC2_Level [ASCENDING->STABLE] (3-5), \n"
        );
        assert_eq!(
            log.render_csv(),
            "2022-03-23 10:00:00.000,s,PLC1,PLC1_A [0->1], ,s,PLC2,PLC2_Level [ASCENDING->STABLE]\n"
        );
        assert_eq!(log.event_count(), 2);
    }

    #[test]
    fn test_entry_built_by_hand() {
        let mut entry = LogEntry::new("2022-03-23 10:00:00.000");
        assert!(entry.is_empty());
        entry.push(flip("PLC1_A", "0", "1"));
        entry.push(flip("PLC1_B", "1", "0"));

        assert_eq!(entry.events().len(), 2);
        assert_eq!(
            entry.to_text_line(),
            "2022-03-23 10:00:00.000: s PLC1 PLC1_A [0->1], s PLC1 PLC1_B [1->0], \n"
        );
    }

    #[test]
    fn test_into_iter_keeps_row_order() {
        let mut builder = EventLogBuilder::new();
        builder.push_row("t1", vec![flip("PLC1_A", "0", "1")]);
        builder.push_row("t2", vec![]);
        builder.push_row("t3", vec![flip("PLC1_A", "1", "0")]);

        let timestamps: Vec<String> = builder
            .finish()
            .into_iter()
            .map(|entry| entry.timestamp().to_string())
            .collect();
        assert_eq!(timestamps, vec!["t1", "t3"]);
    }

    #[test]
    fn test_to_trace() {
        let mut builder = EventLogBuilder::new();
        builder.push_row("2022-03-23 10:00:00.000", vec![flip("X_b", "1", "0")]);
        let trace = builder.finish().to_trace();

        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].content, "s X X_b [1->0], ");
    }
}
