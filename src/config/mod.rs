//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::maintenance::{parse_time_of_day, SafeWindow};
use crate::rules::patterns::DEFAULT_SENSITIVE_KEYWORDS;
use crate::rules::results::Severity;

/// Per-rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether the rule is evaluated
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Severity override (info, warning, alert)
    pub severity: Option<Severity>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Safe maintenance window, UTC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceWindowConfig {
    /// Earliest allowed start (HH:MM)
    #[serde(default = "default_safe_start")]
    pub safe_start: String,

    /// Latest allowed end (HH:MM)
    #[serde(default = "default_safe_end")]
    pub safe_end: String,
}

impl Default for MaintenanceWindowConfig {
    fn default() -> Self {
        Self {
            safe_start: default_safe_start(),
            safe_end: default_safe_end(),
        }
    }
}

impl MaintenanceWindowConfig {
    /// Parse the configured bounds
    pub fn safe_window(&self) -> Result<SafeWindow, ConfigError> {
        let start =
            parse_time_of_day(&self.safe_start).ok_or_else(|| ConfigError::InvalidTime {
                field: "maintenance_window.safe_start",
                value: self.safe_start.clone(),
            })?;
        let end = parse_time_of_day(&self.safe_end).ok_or_else(|| ConfigError::InvalidTime {
            field: "maintenance_window.safe_end",
            value: self.safe_end.clone(),
        })?;

        if start >= end {
            return Err(ConfigError::InvalidWindow {
                start: self.safe_start.clone(),
                end: self.safe_end.clone(),
            });
        }

        Ok(SafeWindow::new(start, end))
    }
}

fn default_safe_start() -> String {
    "13:00".to_string()
}

fn default_safe_end() -> String {
    "20:00".to_string()
}

/// Sensitive environment variable detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveConfig {
    /// Keywords matched case-insensitively as substrings of variable names
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for SensitiveConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_SENSITIVE_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}
