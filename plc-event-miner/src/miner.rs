//! Main miner API
//!
//! This module provides the primary interface for the library. The Miner
//! struct runs the two mining passes over a tabular source:
//!
//! - readings: classify every column, then track boolean flips and scalar
//!   trend reversals row by row;
//! - messages: track Modbus write commands that change a register.
//!
//! Each call builds fresh tracker state, so a Miner can be reused.

use crate::classify::{Classification, TypeClassifier};
use crate::config::MinerConfig;
use crate::event_log::{EventLog, EventLogBuilder};
use crate::formats::{CsvTable, TabularSource};
use crate::modbus::ModbusLayout;
use crate::trackers::{BooleanChangeTracker, CommandChangeTracker, ScalarTrendTracker};
use crate::types::{Kind, MinerError, Result};
use std::path::Path;

/// Result of mining a readings table
#[derive(Debug, Clone)]
pub struct ReadingsOutcome {
    /// Kind of every column, learned in the first pass
    pub classification: Classification,
    /// Events found in the second pass
    pub log: EventLog,
}

/// The main miner struct - entry point for all mining operations
#[derive(Debug, Clone, Default)]
pub struct Miner {
    config: MinerConfig,
}

impl Miner {
    /// Create a miner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a miner with the given configuration
    pub fn with_config(config: MinerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// First readings pass only: the kind of every column
    pub fn classify<S: TabularSource + ?Sized>(&self, source: &S) -> Classification {
        TypeClassifier::new(&self.config).classify(source)
    }

    /// Classify and mine a readings table
    ///
    /// Rows whose timestamp is not sampled are skipped, as are unsampled
    /// values of individual columns.
    ///
    /// # Example
    /// ```
    /// use plc_event_miner::{MemoryTable, Miner};
    ///
    /// let table = MemoryTable::from_rows(
    ///     &["TimeStamp", "PLC1_Pump"],
    ///     &[
    ///         &["2022-03-23 10:00:00.000", "0"],
    ///         &["2022-03-23 10:00:01.000", "1"],
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// let outcome = Miner::new().mine_readings(&table).unwrap();
    /// assert_eq!(
    ///     outcome.log.render_text(),
    ///     "2022-03-23 10:00:01.000: s PLC1 PLC1_Pump [0->1], \n"
    /// );
    /// ```
    pub fn mine_readings<S: TabularSource + ?Sized>(&self, source: &S) -> Result<ReadingsOutcome> {
        let timestamp_index = source
            .column_index(&self.config.timestamp_column)
            .ok_or_else(|| MinerError::MissingColumn(self.config.timestamp_column.clone()))?;

        let classification = self.classify(source);
        let interesting: Vec<_> = classification.interesting().collect();

        let mut scalars = ScalarTrendTracker::new();
        let mut booleans = BooleanChangeTracker::new();
        let mut builder = EventLogBuilder::new();

        for (row, record) in source.records().iter().enumerate() {
            let field = |index: usize| {
                record.get(index).map(String::as_str).ok_or_else(|| {
                    MinerError::InvalidData(format!("record {} has no column {}", row + 1, index))
                })
            };

            let timestamp = field(timestamp_index)?;
            if !self.config.is_sampled(timestamp) {
                continue;
            }

            let mut events = Vec::new();
            for column in &interesting {
                let value = field(column.index)?;
                if !self.config.is_sampled(value) {
                    continue;
                }
                let event = match column.kind {
                    Kind::Boolean => booleans.observe(column.index, &column.name, value),
                    Kind::Scalar => scalars.observe(column.index, &column.name, value)?,
                    Kind::Negligible | Kind::Unresolved => None,
                };
                events.extend(event);
            }
            builder.push_row(timestamp, events);
        }

        let log = builder.finish();
        log::info!(
            "Readings mined: {} rows, {} entries, {} events",
            source.records().len(),
            log.len(),
            log.event_count()
        );
        Ok(ReadingsOutcome {
            classification,
            log,
        })
    }

    /// Mine the write commands of a Modbus capture table
    pub fn mine_messages<S: TabularSource + ?Sized>(&self, source: &S) -> Result<EventLog> {
        let layout = ModbusLayout::resolve(source, &self.config)?;
        let mut commands = CommandChangeTracker::new();
        let mut builder = EventLogBuilder::new();

        for record in source.records() {
            let message = layout.message(record)?;
            if !message.is_command() {
                continue;
            }
            let events = commands.observe(&message).into_iter().collect();
            builder.push_row(message.time(), events);
        }

        let log = builder.finish();
        log::info!(
            "Messages mined: {} records, {} command keys, {} entries",
            source.records().len(),
            commands.tracked_keys(),
            log.len()
        );
        Ok(log)
    }

    /// Read a CSV readings table and mine it
    pub fn mine_readings_file(&self, path: &Path) -> Result<ReadingsOutcome> {
        let table = CsvTable::open(path)?;
        self.mine_readings(&table)
    }

    /// Read a CSV capture table and mine it
    pub fn mine_messages_file(&self, path: &Path) -> Result<EventLog> {
        let table = CsvTable::open(path)?;
        self.mine_messages(&table)
    }
}
