//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-validator.toml` in current directory
//! 4. `~/.config/sql-validator/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["PERF005", "NAME001"]
//!
//! [output]
//! format = "json"              # text, json, yaml
//! color = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_VALIDATOR_FORMAT` | Default report format |
//! | `NO_COLOR` | Disable colored output when set |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules:  RulesConfig,
    #[serde(default)]
    pub output: OutputConfig
}

/// Detector configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled detector IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    /// Default report format (text, json, yaml)
    pub format: Option<String>,
    /// Colored terminal output
    pub color:  Option<bool>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-validator.toml)
    /// 3. Config file in home directory (~/.config/sql-validator/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-validator")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".sql-validator.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        // Override with environment variables
        if let Ok(format) = env::var("SQL_VALIDATOR_FORMAT") {
            config.output.format = Some(format);
        }

        if env::var_os("NO_COLOR").is_some() {
            config.output.color = Some(false);
        }

        Ok(config)
    }

    /// Parse one configuration file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }
}
