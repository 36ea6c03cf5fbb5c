//! JSON output formatting
//!
//! The JSON document is always emitted, including for fail-only runs in which
//! every check passed; consumers can rely on the shape being present.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CatalogRenderer, ReportRenderer};
use crate::catalog::{Rule, RuleCatalog};
use crate::error::OutputError;
use crate::rules::results::{EvaluationResult, Report, Severity, SkippedCheck};

pub struct JsonOutput {
    generated_at: Option<DateTime<Utc>>,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Use a fixed timestamp instead of the current time
    pub fn with_timestamp(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
        }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    version: &'static str,
    section: &'a str,
    generated_at: DateTime<Utc>,
    account_id: Option<&'a str>,
    fail_only: bool,
    summary: Summary,
    results: &'a [EvaluationResult],
    skipped: &'a [SkippedCheck],
}

#[derive(Serialize)]
struct Summary {
    shown: usize,
    passed: usize,
    failed: usize,
    alert: usize,
    warning: usize,
    info: usize,
    skipped: usize,
}

impl Summary {
    fn of(report: &Report) -> Self {
        Self {
            shown: report.len(),
            passed: report.count_passed(),
            failed: report.count_failed(),
            alert: report.count_failed_by_severity(Severity::Alert),
            warning: report.count_failed_by_severity(Severity::Warning),
            info: report.count_failed_by_severity(Severity::Info),
            skipped: report.skipped().len(),
        }
    }
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    id: &'a str,
    #[serde(flatten)]
    rule: &'a Rule,
}

impl ReportRenderer for JsonOutput {
    fn render_report(
        &self,
        section: &str,
        report: &Report,
        account_id: Option<&str>,
    ) -> Result<String, OutputError> {
        let output = ReportOutput {
            version: env!("CARGO_PKG_VERSION"),
            section,
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            account_id,
            fail_only: report.fail_only(),
            summary: Summary::of(report),
            results: report.results(),
            skipped: report.skipped(),
        };

        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        Ok(json)
    }
}

impl CatalogRenderer for JsonOutput {
    fn render_catalog(&self, catalog: &RuleCatalog) -> Result<String, OutputError> {
        let entries: Vec<_> = catalog
            .iter()
            .map(|(id, rule)| CatalogEntry { id, rule })
            .collect();

        let mut json = serde_json::to_string_pretty(&entries)?;
        json.push('\n');
        Ok(json)
    }
}
