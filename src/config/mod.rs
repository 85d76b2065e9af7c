mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::outline::{ParseOptions, Priority};
use crate::rollup::RollupOptions;
use defaults::*;
use std::path::Path;
use tracing::debug;

/// Looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "planledger.yaml";

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            input: default_input(),
            stage_input: true,
            maintenance_initiative: default_maintenance_initiative(),
            priority_threshold: default_priority_threshold(),
            topline_goals: default_topline_goals(),
            board: BoardConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the given file, or `planledger.yaml` when present, or defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Self::load(fallback)
        } else {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.priority_threshold > Priority::MAX {
            return Err(ConfigError::ThresholdOutOfRange(self.priority_threshold));
        }

        if self.maintenance_initiative.trim().is_empty() {
            return Err(ConfigError::EmptyMaintenanceName);
        }

        Ok(())
    }

    pub fn parse_options(&self, verbose: bool) -> ParseOptions {
        ParseOptions {
            maintenance_name: self.maintenance_initiative.trim().to_string(),
            verbose,
        }
    }

    pub fn rollup_options(&self) -> RollupOptions {
        RollupOptions {
            priority_threshold: self.priority_threshold,
        }
    }
}
