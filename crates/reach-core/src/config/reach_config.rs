//! Top-level Reach configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`REACH_*`)
/// 2. Project config (`reach.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReachConfig {
    pub analysis: AnalysisConfig,
}

impl ReachConfig {
    /// Load configuration with 3-layer resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest above defaults): project config
        let project_config_path = root.join("reach.toml");
        if project_config_path.exists() {
            let content = std::fs::read_to_string(&project_config_path).map_err(|_| {
                ConfigError::FileNotFound {
                    path: project_config_path.display().to_string(),
                }
            })?;
            let file_config = Self::from_toml_at(&content, &project_config_path.display().to_string())?;
            Self::merge(&mut config, &file_config);
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config = Self::from_toml_at(toml_str, "<string>")?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn from_toml_at(toml_str: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ReachConfig) -> Result<(), ConfigError> {
        if let Some(max) = config.analysis.max_worklist {
            if max == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_worklist".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut ReachConfig, other: &ReachConfig) {
        if other.analysis.interface_dispatch.is_some() {
            base.analysis.interface_dispatch = other.analysis.interface_dispatch;
        }
        if other.analysis.parallel_entries.is_some() {
            base.analysis.parallel_entries = other.analysis.parallel_entries;
        }
        if other.analysis.max_worklist.is_some() {
            base.analysis.max_worklist = other.analysis.max_worklist;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `REACH_ANALYSIS_INTERFACE_DISPATCH`, etc.
    fn apply_env_overrides(config: &mut ReachConfig) {
        if let Ok(val) = std::env::var("REACH_ANALYSIS_INTERFACE_DISPATCH") {
            if let Ok(v) = val.parse() {
                config.analysis.interface_dispatch = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REACH_ANALYSIS_PARALLEL_ENTRIES") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel_entries = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REACH_ANALYSIS_MAX_WORKLIST") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_worklist = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
