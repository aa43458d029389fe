//! PLC Event Miner Library
//!
//! Turns industrial network captures into compact traces of state changes
//! for process-mining tools.
//!
//! # Architecture
//!
//! The library works in batch over tables held in memory:
//! - Classifies every column of a readings table (negligible, boolean,
//!   scalar or unresolved) from its full value set
//! - Tracks boolean flips and scalar trend reversals row by row
//! - Deduplicates Modbus/TCP write commands per direction and register
//! - Groups the events of each row into a sparse log
//! - Merges several traces into one chronological trace
//!
//! The library does NOT:
//! - Parse the industrial protocol beyond the columns it needs
//! - Stream or follow live captures
//! - Persist anything beyond the text and CSV files it is asked to write
//!
//! # Example Usage
//!
//! ```no_run
//! use plc_event_miner::{read_trace, LogMerger, Miner, MinerConfig};
//! use std::path::Path;
//!
//! let miner = Miner::with_config(MinerConfig::new());
//!
//! // Readings: classification pass, then event pass
//! let readings = miner.mine_readings_file(Path::new("PLC_Dataset_TS.csv")).unwrap();
//! for column in readings.classification.unresolved() {
//!     eprintln!("unresolved: {}", column.name);
//! }
//!
//! // Messages: write commands that change a register
//! let messages = miner.mine_messages_file(Path::new("CleanCaptureWrite.csv")).unwrap();
//!
//! // One chronological trace
//! let first = readings.log.to_trace();
//! let second = messages.to_trace();
//! let merged = LogMerger::new()
//!     .with_patch_date("2022-03-23")
//!     .merge(&[first.as_slice(), second.as_slice()])
//!     .unwrap();
//! merged.write_text(Path::new("MergeEvents.txt")).unwrap();
//! merged.write_csv(Path::new("MergeEvents.csv")).unwrap();
//!
//! // Traces written by an earlier run merge the same way
//! let earlier = read_trace(Path::new("PLC1_PLC2_PLC3_Dataset.txt")).unwrap();
//! println!("{} entries", earlier.len());
//! ```

// Public modules
pub mod classify;
pub mod config;
pub mod event_log;
pub mod formats;
pub mod merge;
pub mod miner;
pub mod modbus;
pub mod trackers;
pub mod types;

// Re-export main types for convenience
pub use classify::{Classification, ColumnInfo, TypeClassifier};
pub use config::{MinerConfig, ModbusColumns};
pub use event_log::{EventLog, EventLogBuilder, LogEntry};
pub use formats::{read_trace, CsvTable, MemoryTable, Record, TabularSource, TraceEntry};
pub use merge::{LogMerger, MergedTrace};
pub use miner::{Miner, ReadingsOutcome};
pub use modbus::{ModbusLayout, ModbusMessage};
pub use trackers::{BooleanChangeTracker, CommandChangeTracker, ScalarTrendTracker};
pub use types::{Kind, MinerError, PlcEvent, Result, Timestamp, Trend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
