//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.marketlens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "marketlens_report.md".to_string()
}

/// Data source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Marketing-data endpoint URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Number of fetch attempts before giving up.
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_url() -> String {
    crate::cli::DEFAULT_DATA_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> usize {
    3
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the resolved map coordinates table in Markdown output.
    #[serde(default = "default_true")]
    pub include_map_points: bool,

    /// Currency symbol used for spend/revenue columns.
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_map_points: true,
            currency_symbol: default_currency(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".marketlens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // URL has a CLI default, but only override the config value when the
        // user actually changed it; otherwise the config file wins.
        if args.url != crate::cli::DEFAULT_DATA_URL {
            self.source.url = args.url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(retries) = args.retries {
            self.source.retries = retries;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.url, crate::cli::DEFAULT_DATA_URL);
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.source.retries, 3);
        assert!(config.report.include_map_points);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "weekly_numbers.md"
verbose = true

[source]
url = "https://example.com/marketing.json"
timeout_seconds = 10

[report]
include_map_points = false
currency_symbol = "AED "
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "weekly_numbers.md");
        assert!(config.general.verbose);
        assert_eq!(config.source.url, "https://example.com/marketing.json");
        assert_eq!(config.source.timeout_seconds, 10);
        // Unset fields keep their defaults.
        assert_eq!(config.source.retries, 3);
        assert!(!config.report.include_map_points);
        assert_eq!(config.report.currency_symbol, "AED ");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[report]"));
    }
}
