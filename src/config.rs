//! Configuration management for the relationship explorer.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the server location, the view to open and export/log locations.

use crate::view::{LinkSource, TableOptions, ViewKind};
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the application's directory under the user config dir.
const APP_DIR: &str = "genie-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relationship server root URL
    pub server_url: String,
    /// View to open
    pub view: ViewKind,
    /// Overrides where detail links come from
    pub link_source: Option<LinkSource>,
    /// Overrides the view's debounce period in milliseconds
    pub debounce_ms: Option<u64>,
    /// CSV file for the local view
    pub local_data_path: Option<String>,
    /// Directory `data.csv` is written to
    pub export_dir: String,
    /// Log file path (relative to config dir or absolute)
    pub log_file: String,
    /// Log level filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            view: ViewKind::default(),
            link_source: None,
            debounce_ms: None,
            local_data_path: None,
            export_dir: ".".to_string(),
            log_file: "genie-tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Strip `//` comments that are not inside a string literal.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let bytes = line.as_bytes();
            for (i, byte) in bytes.iter().enumerate() {
                match *byte {
                    _ if escaped => escaped = false,
                    b'\\' if in_string => escaped = true,
                    b'"' => in_string = !in_string,
                    b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                        return line[..i].trim_end();
                    }
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/genie-tui/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/genie-tui/config.jsonc`
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.jsonc"))
    }

    fn app_dir() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join(APP_DIR))
    }

    /// Get log file path.
    ///
    /// # Details
    /// If log_file is absolute, returns it as-is.
    /// Otherwise, returns path relative to config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_file);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            Ok(Self::app_dir()?.join(log_path))
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.export_dir)
    }

    /// Build the table options for the configured view.
    ///
    /// # Returns
    /// * `Result<TableOptions>` - Preset options with overrides applied
    pub fn table_options(&self) -> Result<TableOptions> {
        let mut options = match self.view {
            ViewKind::Relationships => TableOptions::relationships(),
            ViewKind::Journals => TableOptions::journals(),
            ViewKind::Local => {
                let path = self.local_data_path.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("The local view needs `local_data_path` in the config")
                })?;
                TableOptions::local(PathBuf::from(path))
            }
        };

        if let Some(link_source) = self.link_source {
            options.link_source = link_source;
        }
        if let Some(ms) = self.debounce_ms {
            options.debounce = Duration::from_millis(ms);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:5000");
        assert_eq!(config.view, ViewKind::Relationships);
        assert!(config.link_source.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let config = Config {
            server_url: "http://genie.example:8080".to_string(),
            view: ViewKind::Journals,
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.server_url, "http://genie.example:8080");
        assert_eq!(loaded.view, ViewKind::Journals);
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Relationship server
            "server_url": "http://localhost:5000", // trailing comment
            "view": "journals",
            "link_source": "search",
            "debounce_ms": 100
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.server_url, "http://localhost:5000");
        let options = loaded.table_options().unwrap();
        assert_eq!(options.list_path, "/journals");
        assert_eq!(options.link_source, LinkSource::Search);
        assert_eq!(options.debounce, Duration::from_millis(100));
    }

    #[test]
    fn test_missing_config_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("nope.jsonc"))).unwrap();
        assert_eq!(loaded.view, ViewKind::Relationships);
    }

    #[test]
    fn test_local_view_requires_path() {
        let config = Config {
            view: ViewKind::Local,
            ..Config::default()
        };
        assert!(config.table_options().is_err());

        let config = Config {
            local_data_path: Some("genie.csv".to_string()),
            ..config
        };
        let options = config.table_options().unwrap();
        assert_eq!(options.local_path(), Some(Path::new("genie.csv")));
    }

    #[test]
    fn test_strip_comments_keeps_urls_in_strings() {
        let stripped = strip_comments(r#"{"server_url": "http://a/b"} // note"#);
        assert_eq!(stripped, r#"{"server_url": "http://a/b"}"#);
    }
}
