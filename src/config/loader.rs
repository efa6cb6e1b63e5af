//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ColumnConfig, ColumnsFile, EngineConfig, EngineSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml   # Ordering and net duration policies
/// └── columns.yaml  # Punch sheet header names (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_hours::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Sorting punches: {}", loader.config().sort_by_timestamp());
/// # Ok::<(), shift_hours::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` is missing
    /// - Any file contains invalid YAML
    /// - The column names are empty or repeated
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;

        let columns_path = path.join("columns.yaml");
        let columns = if columns_path.exists() {
            Self::load_yaml::<ColumnsFile>(&columns_path)?.columns
        } else {
            ColumnConfig::default()
        };

        Self::validate_columns(&columns)?;

        debug!(
            name = %settings.name,
            sort_by_timestamp = settings.ordering.sort_by_timestamp,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, columns),
        })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate_columns(&config.columns)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_columns(columns: &ColumnConfig) -> EngineResult<()> {
        let names = columns.names();
        if let Some(empty) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(EngineError::InvalidConfig {
                message: format!("column name #{} is empty", empty + 1),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(EngineError::InvalidConfig {
                    message: format!("column name '{}' is used more than once", name),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the punch sheet column names.
    pub fn columns(&self) -> &ColumnConfig {
        &self.config.columns
    }
}
