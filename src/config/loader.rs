//! Configuration loader

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rules::results::Severity;

use super::{MaintenanceWindowConfig, RuleConfig, SensitiveConfig};

const CONFIG_FILENAME: &str = ".cloudreview.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Show only failed checks
    #[serde(default)]
    pub fail_only: bool,

    /// Rule source replacing the built-in catalog
    #[serde(default)]
    pub rules_file: Option<PathBuf>,

    /// Rule overrides keyed by rule id
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,

    /// Maintenance window configuration
    #[serde(default)]
    pub maintenance_window: MaintenanceWindowConfig,

    /// Sensitive environment variable configuration
    #[serde(default)]
    pub sensitive: SensitiveConfig,
}

impl Config {
    /// Load `.cloudreview.toml` from the working directory, or return default
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        // Reject bad window bounds at load time rather than mid-run
        config.maintenance_window.safe_window()?;

        Ok(config)
    }

    /// Load from an explicit path when given, otherwise the default location
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map(|r| r.enabled).unwrap_or(true)
    }

    /// Get severity override for a rule
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules
            .get(rule_id)
            .and_then(|r| r.severity)
    }
}
