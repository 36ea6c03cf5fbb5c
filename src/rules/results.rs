//! # Evaluation Results
//!
//! This module defines the data structures produced by the rule evaluators
//! and the report that accumulates them.
//!
//! ## Overview
//!
//! - [`Severity`] - Rule severity levels (Info, Warning, Alert)
//! - [`Status`] - Outcome of a single check (Pass, Fail)
//! - [`EvaluationResult`] - One row of the report
//! - [`SkippedCheck`] - A check that could not be evaluated for one resource
//! - [`Report`] - Ordered collection of rows, honoring fail-only mode
//!
//! ## Examples
//!
//! ```rust
//! use cloudreview::rules::results::{EvaluationResult, Report, Severity, Status};
//!
//! let mut report = Report::new(true);
//!
//! report.add(EvaluationResult::new(
//!     "s3-encryption", "S3", Status::Pass, Severity::Alert,
//!     "app-assets", "Enabled", "Default encryption is not configured",
//! ));
//! report.add(EvaluationResult::new(
//!     "s3-public-access", "S3", Status::Fail, Severity::Alert,
//!     "app-assets", "Disabled", "Public access block is not configured",
//! ));
//!
//! // Fail-only mode keeps only the failing row
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.count_failed(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for rules.
///
/// - **Alert** - Must be fixed (e.g., unencrypted storage, public databases)
/// - **Warning** - Should be addressed (e.g., missing logs)
/// - **Info** - Recommendations (e.g., lifecycle policies)
///
/// Ordered from least to most severe so that `Severity::Alert > Severity::Info`.
///
/// # Examples
///
/// ```rust
/// use cloudreview::rules::Severity;
///
/// assert_eq!(Severity::from_string("ALERT"), Some(Severity::Alert));
/// assert_eq!(Severity::from_string("warn"), Some(Severity::Warning));
/// assert!(Severity::Alert > Severity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Severity {
    /// Informational recommendations.
    Info,
    /// Issues that should be addressed.
    Warning,
    /// Issues that must be fixed.
    Alert,
}

impl Severity {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "information" | "notice" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "alert" | "critical" => Some(Self::Alert),
            _ => None,
        }
    }

    /// Label used in rendered output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Alert => "Alert",
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value).ok_or_else(|| {
            format!(
                "unknown severity '{}', expected one of: Info, Warning, Alert",
                value
            )
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of evaluating one rule against one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single row of the compliance report.
///
/// Created by an evaluator from the catalog entry of its rule, then handed to
/// the [`Report`] exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Rule identifier (e.g., "rds-general-log")
    pub rule_id: String,

    /// Service owning the rule (e.g., "RDS")
    pub service: String,

    /// Whether the resource complies with the rule
    pub status: Status,

    /// Severity of the rule
    pub severity: Severity,

    /// Identifier of the evaluated resource
    pub resource_id: String,

    /// The observed setting value (e.g., "Enabled", "Found: DB_PASSWORD")
    pub observed: String,

    /// Human-readable issue description from the catalog
    pub issue: String,
}

impl EvaluationResult {
    pub fn new(
        rule_id: impl Into<String>,
        service: impl Into<String>,
        status: Status,
        severity: Severity,
        resource_id: impl Into<String>,
        observed: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            service: service.into(),
            status,
            severity,
            resource_id: resource_id.into(),
            observed: observed.into(),
            issue: issue.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == Status::Fail
    }
}

/// A check that was not evaluated because data it depends on was unavailable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCheck {
    pub rule_id: String,
    pub resource_id: String,
    pub reason: String,
}

/// Ordered collection of evaluation results for one run.
///
/// Rows keep insertion order, which is evaluation order. In fail-only mode,
/// passing rows are discarded as they are added; evaluation itself is never
/// affected by the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    fail_only: bool,
    results: Vec<EvaluationResult>,
    skipped: Vec<SkippedCheck>,
}

impl Report {
    pub fn new(fail_only: bool) -> Self {
        Self {
            fail_only,
            results: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Add a row, dropping it silently if fail-only is set and it passed
    pub fn add(&mut self, result: EvaluationResult) {
        if self.fail_only && result.is_pass() {
            return;
        }
        self.results.push(result);
    }

    pub fn add_all(&mut self, results: impl IntoIterator<Item = EvaluationResult>) {
        for result in results {
            self.add(result);
        }
    }

    pub fn add_skipped(&mut self, skipped: impl IntoIterator<Item = SkippedCheck>) {
        self.skipped.extend(skipped);
    }

    pub fn fail_only(&self) -> bool {
        self.fail_only
    }

    /// Rows retained for display
    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn skipped(&self) -> &[SkippedCheck] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn count_passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_pass()).count()
    }

    pub fn count_failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_fail()).count()
    }

    /// Count failing rows of a given severity
    pub fn count_failed_by_severity(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.is_fail() && r.severity == severity)
            .count()
    }

    /// Highest severity among failing rows
    pub fn worst_failure(&self) -> Option<Severity> {
        self.results
            .iter()
            .filter(|r| r.is_fail())
            .map(|r| r.severity)
            .max()
    }

    /// Get rows by service
    pub fn results_by_service<'a>(
        &'a self,
        service: &'a str,
    ) -> impl Iterator<Item = &'a EvaluationResult> {
        self.results.iter().filter(move |r| r.service == service)
    }
}
