//! Configuration for the Warden runner.
//!
//! Handles loading and merging runner configuration from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur in configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Snapshot file restored before a run and written back after it
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Whether to print registry state after every command
    #[serde(default)]
    pub echo_state: bool,

    /// Log filter directive, e.g. "info" or "warden_runtime=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Capacity of the access-check audit trail; 0 disables auditing
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_audit_capacity() -> usize {
    256
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            echo_state: false,
            log_filter: default_log_filter(),
            audit_capacity: default_audit_capacity(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a file
    ///
    /// Starts from defaults; a missing file is not an error, only a
    /// warning. The loaded configuration is validated before being
    /// returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Start with default configuration
        let mut config = RunnerConfig::default();

        // If a path is provided, try to load from it
        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());

            // Check if the file exists
            if !path.exists() {
                warn!("Configuration file not found: {}", path.display());
                return Ok(config);
            }

            // Read the file
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

            // Parse the configuration
            config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse configuration file: {}", path.display())
            })?;
        } else {
            info!("No configuration file specified, using defaults");
        }

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Check log filter
        if self.log_filter.is_empty() {
            return Err(ConfigError::Invalid("Log filter cannot be empty".to_string()).into());
        }

        // Check snapshot path
        if let Some(path) = &self.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(
                    ConfigError::Invalid("Snapshot path cannot be empty".to_string()).into(),
                );
            }
        }

        Ok(())
    }

    /// Merge with another configuration
    ///
    /// Flags and paths set in `other` override this configuration; unset
    /// fields are left alone. Used to layer command-line flags over a
    /// config file.
    pub fn merge(&mut self, other: RunnerConfig) {
        // Merge snapshot path
        if other.snapshot_path.is_some() {
            self.snapshot_path = other.snapshot_path;
        }

        // Merge echo flag
        if other.echo_state {
            self.echo_state = true;
        }

        // Merge log filter
        if !other.log_filter.is_empty() {
            self.log_filter = other.log_filter;
        }

        // Merge audit capacity
        if other.audit_capacity > 0 {
            self.audit_capacity = other.audit_capacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        // Create a temporary config file
        let file = NamedTempFile::new().unwrap();
        let path = file.path();

        // Write a test configuration
        let config_toml = r#"
snapshot_path = "/tmp/registries.json"
echo_state = true
log_filter = "debug"
"#;
        fs::write(path, config_toml).unwrap();

        // Load the configuration
        let config = RunnerConfig::load(Some(path)).unwrap();

        // Verify loaded values
        assert_eq!(
            config.snapshot_path,
            Some(PathBuf::from("/tmp/registries.json"))
        );
        assert!(config.echo_state);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.audit_capacity, 256);
    }

    #[test]
    fn test_default_config() {
        // Load the default configuration
        let config = RunnerConfig::load(None).unwrap();

        // Verify default values
        assert_eq!(config.snapshot_path, None);
        assert!(!config.echo_state);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.audit_capacity, 256);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = RunnerConfig::load(Some(Path::new("/nonexistent/warden.toml"))).unwrap();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "snapshot_path = [not toml").unwrap();

        assert!(RunnerConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_log_filter() {
        let config = RunnerConfig {
            log_filter: String::new(),
            ..RunnerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_config() {
        // Create a base configuration
        let mut base = RunnerConfig::default();

        // Create an override configuration
        let override_config = RunnerConfig {
            snapshot_path: Some(PathBuf::from("/override/registries.json")),
            echo_state: true,
            log_filter: "trace".to_string(),
            audit_capacity: 16,
        };

        // Merge the configurations
        base.merge(override_config);

        // Verify merged values
        assert_eq!(
            base.snapshot_path,
            Some(PathBuf::from("/override/registries.json"))
        );
        assert!(base.echo_state);
        assert_eq!(base.log_filter, "trace");
        assert_eq!(base.audit_capacity, 16);
    }
}
