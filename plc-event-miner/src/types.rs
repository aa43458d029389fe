//! Core types for the PLC event miner
//!
//! This module defines the values the miner emits: column kinds, trend
//! directions and the three event variants, plus the shared error type and
//! the fixed timestamp layout used when traces are merged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Timestamp type used when ordering traces
pub type Timestamp = NaiveDateTime;

/// Result type for miner operations
pub type Result<T> = std::result::Result<T, MinerError>;

/// `chrono` layout matching `YYYY-MM-DD HH:MM:SS.mmm`
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Width of the fixed timestamp prefix
pub const TIMESTAMP_WIDTH: usize = 23;

/// Positions inside the fixed-width prefix that hold separators
const LAYOUT_SEPARATORS: [(usize, u8); 6] = [
    (4, b'-'),
    (7, b'-'),
    (10, b' '),
    (13, b':'),
    (16, b':'),
    (19, b'.'),
];

/// Errors that can occur while mining or merging
#[derive(Debug, thiserror::Error)]
pub enum MinerError {
    #[error("Invalid timestamp '{0}' (expected YYYY-MM-DD HH:MM:SS.mmm)")]
    InvalidTimestamp(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Malformed trace line {line}: {content:?}")]
    MalformedTraceLine { line: usize, content: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Kind of a column, inferred once from its complete value set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// A single distinct value: carries no information
    Negligible,
    /// Exactly the pair {"1","0"} or {"1.0","0.0"}
    Boolean,
    /// Every value parses as a finite float
    Scalar,
    /// Anything else; reported and skipped
    Unresolved,
}

impl Kind {
    /// Whether columns of this kind take part in event mining
    pub fn is_interesting(self) -> bool {
        matches!(self, Kind::Boolean | Kind::Scalar)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Negligible => write!(f, "Negligible"),
            Kind::Boolean => write!(f, "Boolean"),
            Kind::Scalar => write!(f, "Scalar"),
            Kind::Unresolved => write!(f, "Unresolved"),
        }
    }
}

/// Direction of change between two consecutive observations of a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Ascending,
    Descending,
    Stable,
}

impl Trend {
    /// Compare two numeric samples
    pub fn between(previous: f64, current: f64) -> Self {
        if current == previous {
            Trend::Stable
        } else if current > previous {
            Trend::Ascending
        } else {
            Trend::Descending
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Ascending => write!(f, "ASCENDING"),
            Trend::Descending => write!(f, "DESCENDING"),
            Trend::Stable => write!(f, "STABLE"),
        }
    }
}

/// A state change detected by one of the trackers
///
/// Events carry no timestamp; the owning [`LogEntry`](crate::event_log::LogEntry) does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlcEvent {
    /// A boolean column flipped
    Boolean {
        field: String,
        previous: String,
        current: String,
    },

    /// A scalar column reversed its trend
    Scalar {
        field: String,
        previous_trend: Trend,
        current_trend: Trend,
        /// Value at which the trend that just ended started
        initial_value: String,
        /// Value at which the new trend was detected
        final_value: String,
    },

    /// A write command changed the value of a register
    Message {
        source: String,
        destination: String,
        register: String,
        data: String,
    },
}

impl PlcEvent {
    /// Short tag used in both renderings: `s` for readings, `m` for messages
    pub fn tag(&self) -> &'static str {
        match self {
            PlcEvent::Boolean { .. } | PlcEvent::Scalar { .. } => "s",
            PlcEvent::Message { .. } => "m",
        }
    }

    /// Device the event is attributed to
    pub fn device(&self) -> &str {
        match self {
            PlcEvent::Boolean { field, .. } | PlcEvent::Scalar { field, .. } => device_id_of(field),
            PlcEvent::Message { source, .. } => device_id_of(source),
        }
    }

    /// Append the human-readable rendering, including its trailing `", "`
    pub fn append_text(&self, buf: &mut String) {
        // Writing into a String cannot fail
        let _ = match self {
            PlcEvent::Boolean {
                field,
                previous,
                current,
            } => write!(
                buf,
                "s {} {} [{}->{}], ",
                device_id_of(field),
                field,
                previous,
                current
            ),
            PlcEvent::Scalar {
                field,
                previous_trend,
                current_trend,
                initial_value,
                final_value,
            } => write!(
                buf,
                "s {} {} [{}->{}] ({}-{}), ",
                device_id_of(field),
                field,
                previous_trend,
                current_trend,
                initial_value,
                final_value
            ),
            PlcEvent::Message {
                source,
                destination,
                register,
                data,
            } => write!(
                buf,
                "m {} {} -> {} [{}={}], ",
                device_id_of(source),
                source,
                destination,
                register,
                data
            ),
        };
    }

    /// Append the CSV rendering, starting with its leading comma
    ///
    /// Scalar events drop their interval and trailing separator in this form.
    pub fn append_csv(&self, buf: &mut String) {
        let _ = match self {
            PlcEvent::Boolean {
                field,
                previous,
                current,
            } => write!(
                buf,
                ",s,{},{} [{}->{}], ",
                device_id_of(field),
                field,
                previous,
                current
            ),
            PlcEvent::Scalar {
                field,
                previous_trend,
                current_trend,
                ..
            } => write!(
                buf,
                ",s,{},{} [{}->{}]",
                device_id_of(field),
                field,
                previous_trend,
                current_trend
            ),
            PlcEvent::Message {
                source,
                destination,
                register,
                data,
            } => write!(
                buf,
                ",m,{},{} -> {} [{}={}], ",
                device_id_of(source),
                source,
                destination,
                register,
                data
            ),
        };
    }

    /// Human-readable rendering as an owned string
    pub fn to_text(&self) -> String {
        let mut buf = String::new();
        self.append_text(&mut buf);
        buf
    }

    /// CSV rendering as an owned string
    pub fn to_csv(&self) -> String {
        let mut buf = String::new();
        self.append_csv(&mut buf);
        buf
    }
}

/// Device identifier of a column or host name
///
/// Everything before the first `_` when the name has one, otherwise
/// everything before the first space.
pub fn device_id_of(name: &str) -> &str {
    let separator = if name.contains('_') { '_' } else { ' ' };
    name.split(separator).next().unwrap_or(name)
}

/// Fixed-width timestamp prefix of a raw timestamp
///
/// Shorter inputs are returned whole.
pub fn timestamp_prefix(raw: &str) -> &str {
    raw.get(..TIMESTAMP_WIDTH).unwrap_or(raw)
}

/// Parse the fixed-width `YYYY-MM-DD HH:MM:SS.mmm` prefix of a timestamp
///
/// Any text after the prefix is ignored.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let invalid = || MinerError::InvalidTimestamp(raw.to_string());

    let prefix = raw.get(..TIMESTAMP_WIDTH).ok_or_else(invalid)?;
    let bytes = prefix.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        let expected = LAYOUT_SEPARATORS.iter().find(|(pos, _)| *pos == i);
        let ok = match expected {
            Some((_, sep)) => b == sep,
            None => b.is_ascii_digit(),
        };
        if !ok {
            return Err(invalid());
        }
    }

    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_LAYOUT).map_err(|_| invalid())
}
