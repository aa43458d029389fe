//! Tabular sources and textual trace formats
//!
//! This module contains the readers the miner consumes and the line format
//! it produces. Each tabular source exposes its ordered column names and
//! its records, with values kept exactly as captured.

use crate::types::Result;

pub mod csv_table;
pub mod memory;
pub mod trace_text;

// Re-export source types
pub use csv_table::CsvTable;
pub use memory::MemoryTable;
pub use trace_text::{read_trace, write_trace_csv, write_trace_text, TraceEntry};

/// One row of a table, values aligned with the source's column names
pub type Record = Vec<String>;

/// Common trait for all tabular sources
///
/// Records hold one value per column, in column order. Name lookups resolve
/// to the last column carrying that name.
pub trait TabularSource {
    /// Ordered column names
    fn column_names(&self) -> &[String];

    /// All records in capture order
    fn records(&self) -> &[Record];

    /// Index of the last column with the given name
    fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().rposition(|c| c == name)
    }
}

/// Check that every record is as wide as the header
pub(crate) fn check_widths(columns: &[String], records: &[Record]) -> Result<()> {
    for (row, record) in records.iter().enumerate() {
        if record.len() != columns.len() {
            return Err(crate::types::MinerError::InvalidData(format!(
                "record {} has {} fields, expected {}",
                row + 1,
                record.len(),
                columns.len()
            )));
        }
    }
    Ok(())
}
