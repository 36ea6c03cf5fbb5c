//! Error types for cloudreview
//!
//! This module defines custom error types using `thiserror`. Every variant
//! reachable from here is fatal for the run: it propagates to `main`, which
//! prints it and exits non-zero. Failures that only degrade a single row of the
//! report (a parameter group that cannot be resolved, ancillary data that
//! could not be fetched for one resource) never become one of these errors;
//! the rules engine logs them and records the affected checks as skipped.

use thiserror::Error;

/// Main error type for cloudreview
#[derive(Error, Debug)]
pub enum CloudReviewError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule catalog errors
    #[error("Rule catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Inventory loading errors
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Report output errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// `--only` left nothing to evaluate once unknown names were dropped
    #[error("--only names no known service (requested: {requested})")]
    NoServicesSelected {
        /// The services as given on the command line
        requested: String,
    },
}

/// Errors that occur while loading `.cloudreview.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// Path to the configuration file
        path: String,
        /// The underlying TOML error
        source: toml::de::Error,
    },

    /// A configured time of day is not `HH:MM`
    #[error("Invalid time '{value}' for '{field}', expected HH:MM")]
    InvalidTime {
        /// Configuration key holding the value
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// The safe maintenance window does not start before it ends
    #[error("Maintenance window '{start}'-'{end}' must start before it ends")]
    InvalidWindow {
        /// Configured `safe_start`
        start: String,
        /// Configured `safe_end`
        end: String,
    },
}

/// Errors raised by the rule catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the rule source
    #[error("Failed to read rule source '{path}': {source}")]
    FileRead {
        /// Path to the rule source
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The rule source is not valid YAML or does not match the rule schema
    #[error("Failed to parse rule source '{path}': {source}")]
    Parse {
        /// Path to the rule source
        path: String,
        /// The underlying YAML error
        source: serde_yaml::Error,
    },

    /// The rule source parsed but defines no rules
    #[error("Rule source '{path}' defines no rules")]
    Empty {
        /// Path to the rule source
        path: String,
    },

    /// An evaluator references a rule id the catalog does not define
    #[error("Rule '{rule_id}' used by the {category} checks is not defined in the rule catalog")]
    UnknownRule {
        /// The missing rule id
        rule_id: String,
        /// Category whose evaluator references the rule
        category: String,
    },
}

/// Errors that occur while loading the resource inventory
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Failed to read the inventory document
    #[error("Failed to read inventory '{path}': {source}")]
    FileRead {
        /// Path to the inventory document
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The inventory document is not valid JSON or does not match the schema
    #[error("Failed to parse inventory '{path}': {source}")]
    Parse {
        /// Path to the inventory document
        path: String,
        /// The underlying JSON error
        source: serde_json::Error,
    },
}

/// Errors that occur while producing report output
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to serialize the report
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the report file
    #[error("Failed to write report '{path}': {source}")]
    FileWrite {
        /// Path to the output file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}
