//! Configuration loading and parsing

use anyhow::{Context, Result};
use plc_event_miner::MinerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub miner: MinerConfig,
    #[serde(default)]
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Date given to a first trace that only carries times of day
    #[serde(default = "default_patch_date")]
    pub patch_date: Option<String>,
}

fn default_patch_date() -> Option<String> {
    Some("2022-03-23".to_string())
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            patch_date: default_patch_date(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(date) = &config.merge.patch_date {
        validate_date(date).with_context(|| format!("Invalid [merge] section in {:?}", path))?;
    }

    Ok(config)
}

/// Check that a patch date is a `YYYY-MM-DD` calendar date
pub fn validate_date(date: &str) -> Result<()> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid patch date '{}' (expected YYYY-MM-DD)", date))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [miner]
            sentinel = "NaN"
            timestamp_column = "Timestamp"

            [miner.modbus]
            register = "Register"

            [merge]
            patch_date = "2023-01-02"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.miner.sentinel, "NaN");
        assert_eq!(config.miner.timestamp_column, "Timestamp");
        assert_eq!(config.miner.modbus.register, "Register");
        assert_eq!(config.miner.modbus.data, "Data");
        assert_eq!(config.miner.protocol, "Modbus/TCP");
        assert_eq!(config.merge.patch_date.as_deref(), Some("2023-01-02"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.miner, MinerConfig::default());
        assert_eq!(config.merge.patch_date.as_deref(), Some("2022-03-23"));
    }

    #[test]
    fn test_load_config_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[merge]\npatch_date = \"23/03/2022\"\n").unwrap();
        assert!(load_config(&path).is_err());

        fs::write(&path, "[merge]\npatch_date = \"2022-03-23\"\n").unwrap();
        assert!(load_config(&path).is_ok());
    }
}
