//! CLI commands module

pub mod audit;
pub mod rules;

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

use crate::catalog::RuleCatalog;
use crate::config::Config;
use crate::error::CatalogError;

/// Arguments shared by every audit command
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Inventory document produced by the collector
    #[arg(short, long, value_name = "FILE", env = "CLOUDREVIEW_INVENTORY")]
    pub inventory: PathBuf,

    /// Output format
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with 1 on Alert failures and 2 on Warning failures
    #[arg(long)]
    pub exit_code: bool,
}

/// Arguments for the all command
#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    #[command(flatten)]
    pub audit: AuditArgs,

    /// Only evaluate specific services
    #[arg(long, value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Skip specific services
    #[arg(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,
}

/// Arguments for the rules command
#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    /// Output format
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

/// Load the rule catalog: `--rules` first, then `rules_file`, then built-in
pub(crate) fn load_catalog(
    rules_override: Option<&Path>,
    config: &Config,
) -> Result<RuleCatalog, CatalogError> {
    let path = rules_override.or(config.rules_file.as_deref());
    RuleCatalog::load(path)
}
