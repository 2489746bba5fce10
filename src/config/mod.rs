//! Configuration management module.
//!
//! Handles loading and saving application configuration from JSON file.

use crate::core::inspector::InspectorOptions;
use crate::core::label::EncodingLabel;
use crate::core::report::{DEFAULT_MAX_ENTRIES, DEFAULT_SAMPLE_CHARS};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE_NAME: &str = "encoding_inspector_config.json";
const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_source: EncodingLabel,
    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,
    #[serde(default = "default_max_report_chars")]
    pub max_report_chars: usize,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Copy the output to the clipboard after each conversion.
    #[serde(default)]
    pub auto_copy: bool,
    #[serde(default)]
    pub last_directory: String,
}

fn default_sample_chars() -> usize {
    DEFAULT_SAMPLE_CHARS
}

fn default_max_report_chars() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_source: EncodingLabel::AutoDetect,
            sample_chars: DEFAULT_SAMPLE_CHARS,
            max_report_chars: DEFAULT_MAX_ENTRIES,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            auto_copy: false,
            last_directory: String::new(),
        }
    }
}

impl Config {
    pub fn inspector_options(&self) -> InspectorOptions {
        InspectorOptions {
            sample_chars: self.sample_chars,
            max_entries: self.max_report_chars,
        }
    }
}

/// Configuration manager for loading/saving config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(Self::get_exe_directory().join(CONFIG_FILE_NAME))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Get the directory containing the executable.
    fn get_exe_directory() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the config file path.
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file, falling back to defaults.
    pub fn load(&self) -> Config {
        let mut config = match self.try_load() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                warn!("Ignoring config file: {:#}", e);
                Config::default()
            }
        };

        // Zero limits would make the report useless
        if config.sample_chars == 0 {
            config.sample_chars = DEFAULT_SAMPLE_CHARS;
        }
        if config.max_report_chars == 0 {
            config.max_report_chars = DEFAULT_MAX_ENTRIES;
        }
        if config.max_file_bytes == 0 {
            config.max_file_bytes = DEFAULT_MAX_FILE_BYTES;
        }

        config
    }

    fn try_load(&self) -> anyhow::Result<Option<Config>> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("reading {}", self.config_path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.config_path.display()))?;
        Ok(Some(config))
    }

    /// Save configuration to file.
    pub fn save(&self, config: &Config) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, json)
            .with_context(|| format!("writing {}", self.config_path.display()))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.auto_copy);
        assert_eq!(config.default_source, EncodingLabel::AutoDetect);
        assert_eq!(config.sample_chars, 50);
        assert_eq!(config.max_report_chars, 15);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.default_source = EncodingLabel::ShiftJis;
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"shift_jis\""));
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = serde_json::from_str(r#"{"auto_copy": true}"#).unwrap();
        assert!(parsed.auto_copy);
        assert_eq!(parsed.sample_chars, 50);
        assert_eq!(parsed.default_source, EncodingLabel::AutoDetect);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join(CONFIG_FILE_NAME));

        let mut config = Config::default();
        config.default_source = EncodingLabel::Gbk;
        config.max_report_chars = 0;
        manager.save(&config).unwrap();

        let loaded = manager.load();
        assert_eq!(loaded.default_source, EncodingLabel::Gbk);
        assert_eq!(loaded.max_report_chars, 15);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let loaded = ConfigManager::with_path(path).load();
        assert_eq!(loaded, Config::default());
    }
}
