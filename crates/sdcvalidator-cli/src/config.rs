//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables
//! - Command-line arguments (applied by the handlers)

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use sdcvalidator_core::ComplianceScope;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding `engine.command`
pub const ENGINE_ENV: &str = "SDCVALIDATOR_ENGINE";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External instance validation engine
    pub engine: EngineConfig,

    /// Schema compliance gate
    pub compliance: ComplianceConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Instance engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Argv template; `{schema}` and `{instance}` are substituted per run
    pub command: Vec<String>,
}

/// Compliance gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    pub enabled: bool,
    pub scope: ComplianceScope,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scope: ComplianceScope::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to load config, trying next location");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then apply the environment
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.merge_with_env();
        Ok(config)
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        if let Ok(command) = std::env::var(ENGINE_ENV) {
            self.apply_engine_override(&command);
        }
    }

    fn apply_engine_override(&mut self, command: &str) {
        let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if !argv.is_empty() {
            self.engine.command = argv;
        }
    }

    /// Project config file in the current directory
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".sdcvalidator.toml")
    }

    /// Config file in the user config directory
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sdcvalidator").join("config.toml"))
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".sdcvalidator.toml"),
            PathBuf::from(".sdcvalidator.yaml"),
            PathBuf::from(".sdcvalidator.yml"),
            PathBuf::from(".sdcvalidator.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let dir = config_dir.join("sdcvalidator");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
        }

        paths
    }

    /// Serialize in the format implied by `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        Ok(match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
