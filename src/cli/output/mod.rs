//! Output formatting module for CLI

pub mod json;
mod table;
mod terminal;

pub use json::JsonOutput;
pub use table::{Cell, Table};
pub use terminal::TerminalOutput;

use crate::catalog::RuleCatalog;
use crate::error::OutputError;
use crate::rules::results::Report;

/// Trait for rendering report output
pub trait ReportRenderer {
    /// Render `report` under the heading `section`.
    ///
    /// An empty string means there is nothing to display.
    fn render_report(
        &self,
        section: &str,
        report: &Report,
        account_id: Option<&str>,
    ) -> Result<String, OutputError>;
}

/// Trait for rendering the rule catalog
pub trait CatalogRenderer {
    fn render_catalog(&self, catalog: &RuleCatalog) -> Result<String, OutputError>;
}
