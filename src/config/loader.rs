//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::NewLeaveType;

use super::types::{EngineConfig, LeaveTypesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml       # Standard day length and salary structure defaults
/// └── leave_types.yaml  # Leave type catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Standard day: {} hours", loader.config().standard_daily_hours);
/// for leave_type in loader.leave_types() {
///     println!("{}: {} days", leave_type.name, leave_type.max_days_per_year);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    leave_types: Vec<NewLeaveType>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        let leave_types =
            Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?.leave_types;

        debug!(
            path = %path.display(),
            leave_types = leave_types.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config,
            leave_types,
        })
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

    /// Returns the engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configured leave type catalogue.
    pub fn leave_types(&self) -> &[NewLeaveType] {
        &self.leave_types
    }
}
