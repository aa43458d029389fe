//! In-memory table

use super::{check_widths, Record, TabularSource};
use crate::types::Result;

/// A table held entirely in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl MemoryTable {
    /// Build a table, rejecting records whose width differs from the header
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Result<Self> {
        check_widths(&columns, &records)?;
        Ok(Self { columns, records })
    }

    /// Convenience constructor from string slices
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let records = rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        Self::new(columns, records)
    }
}

impl TabularSource for MemoryTable {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn records(&self) -> &[Record] {
        &self.records
    }
}
