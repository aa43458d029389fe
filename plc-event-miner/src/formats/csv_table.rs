//! CSV table reader
//!
//! Reads comma-delimited, `"`-quoted files with a header row into memory.
//! Empty lines are skipped and duplicate header names are allowed.

use super::{Record, TabularSource};
use crate::types::Result;
use std::io::Read;
use std::path::Path;

/// A CSV file fully loaded into memory
#[derive(Debug, Clone)]
pub struct CsvTable {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl CsvTable {
    /// Open and read a CSV file
    pub fn open(path: &Path) -> Result<Self> {
        log::info!("Reading table: {:?}", path);
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        log::info!(
            "Table loaded: {} columns, {} records",
            table.columns.len(),
            table.records.len()
        );
        Ok(table)
    }

    /// Read a CSV document from any reader
    ///
    /// The csv defaults apply: comma delimiter, `"` quoting, a header row and
    /// records as wide as the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(row.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, records })
    }
}

impl TabularSource for CsvTable {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn records(&self) -> &[Record] {
        &self.records
    }
}
