//! Run summaries
//!
//! Prints what a mining pass found and optionally saves the column
//! classification as JSON.

use anyhow::{Context, Result};
use plc_event_miner::{Classification, EventLog, Kind};
use std::fs;
use std::path::Path;

/// Column counts per kind, plus the unresolved columns by name
#[derive(Debug)]
pub struct ClassificationSummary<'a> {
    pub negligible: usize,
    pub boolean: usize,
    pub scalar: usize,
    pub unresolved: Vec<&'a str>,
}

impl<'a> ClassificationSummary<'a> {
    pub fn new(classification: &'a Classification) -> Self {
        Self {
            negligible: classification.count(Kind::Negligible),
            boolean: classification.count(Kind::Boolean),
            scalar: classification.count(Kind::Scalar),
            unresolved: classification
                .unresolved()
                .map(|c| c.name.as_str())
                .collect(),
        }
    }
}

/// Print the classification and log statistics of a readings run
pub fn print_readings(classification: &Classification, log: &EventLog) {
    let summary = ClassificationSummary::new(classification);

    println!("Columns:");
    println!("  Negligible: {}", summary.negligible);
    println!("  Boolean:    {}", summary.boolean);
    println!("  Scalar:     {}", summary.scalar);
    println!("  Unresolved: {}", summary.unresolved.len());
    for column in classification.unresolved() {
        println!("    * {}: {}", column.index, column.name);
    }
    print_log(log);
}

/// Print the statistics of a log
pub fn print_log(log: &EventLog) {
    println!("Log entries: {}", log.len());
    println!("Events:      {}", log.event_count());
}

/// Save the full classification as pretty-printed JSON
pub fn write_classification(path: &Path, classification: &Classification) -> Result<()> {
    let json = serde_json::to_string_pretty(classification)
        .context("Failed to serialize classification")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
    log::info!("Classification written to {:?}", path);
    Ok(())
}
