//! Miner configuration types
//!
//! This module defines the small amount of configuration the miner needs:
//! the not-sampled sentinel, the readings timestamp column and the column
//! names and markers used to recognise Modbus write commands.

use serde::{Deserialize, Serialize};

/// Configuration for the miner library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinerConfig {
    /// Marker for a field that was not sampled in a row
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Column holding the row timestamp in readings tables
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,

    /// Column names of a Modbus capture table
    #[serde(default)]
    pub modbus: ModbusColumns,

    /// Protocol tag a command must carry
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Info marker identifying responses, which are never commands
    #[serde(default = "default_response_marker")]
    pub response_marker: String,

    /// Function code prefix identifying write requests
    #[serde(default = "default_write_prefix")]
    pub write_prefix: String,
}

fn default_sentinel() -> String {
    "N/A".to_string()
}

fn default_timestamp_column() -> String {
    "TimeStamp".to_string()
}

fn default_protocol() -> String {
    "Modbus/TCP".to_string()
}

fn default_response_marker() -> String {
    "Response".to_string()
}

fn default_write_prefix() -> String {
    "Write".to_string()
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
            timestamp_column: default_timestamp_column(),
            modbus: ModbusColumns::default(),
            protocol: default_protocol(),
            response_marker: default_response_marker(),
            write_prefix: default_write_prefix(),
        }
    }
}

/// Column names of a packet capture exported as a table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModbusColumns {
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub function_code: String,
    pub register: String,
    pub info: String,
    pub data: String,
    pub time: String,
}

impl Default for ModbusColumns {
    fn default() -> Self {
        Self {
            source: "Source".to_string(),
            destination: "Destination".to_string(),
            protocol: "Protocol".to_string(),
            function_code: "Function Code".to_string(),
            register: "Reference Number".to_string(),
            info: "Info".to_string(),
            data: "Data".to_string(),
            time: "Time".to_string(),
        }
    }
}

impl MinerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the not-sampled sentinel
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Builder method: set the readings timestamp column
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }

    /// Builder method: set the Modbus capture column names
    pub fn with_modbus_columns(mut self, columns: ModbusColumns) -> Self {
        self.modbus = columns;
        self
    }

    /// Builder method: set the protocol tag commands must carry
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Check whether a raw value is an actual observation
    pub fn is_sampled(&self, value: &str) -> bool {
        value != self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miner_config_builder() {
        let config = MinerConfig::new()
            .with_sentinel("-")
            .with_timestamp_column("Timestamp")
            .with_protocol("Modbus");

        assert_eq!(config.sentinel, "-");
        assert_eq!(config.timestamp_column, "Timestamp");
        assert_eq!(config.protocol, "Modbus");
        assert_eq!(config.write_prefix, "Write");
    }

    #[test]
    fn test_with_modbus_columns() {
        let columns = ModbusColumns {
            register: "Register".to_string(),
            data: "Value".to_string(),
            ..ModbusColumns::default()
        };
        let config = MinerConfig::new().with_modbus_columns(columns);

        assert_eq!(config.modbus.register, "Register");
        assert_eq!(config.modbus.data, "Value");
        assert_eq!(config.modbus.time, "Time");
    }

    #[test]
    fn test_sampled_values() {
        let config = MinerConfig::new();
        assert!(config.is_sampled("0"));
        assert!(config.is_sampled(""));
        assert!(!config.is_sampled("N/A"));
    }

    #[test]
    fn test_partial_modbus_columns() {
        let columns: ModbusColumns =
            serde_json::from_str(r#"{"register": "Register"}"#).unwrap();
        assert_eq!(columns.register, "Register");
        assert_eq!(columns.source, "Source");
    }
}
