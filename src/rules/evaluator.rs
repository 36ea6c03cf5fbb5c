//! # Evaluator abstraction
//!
//! Every rule reduces to a predicate over one resource snapshot producing an
//! [`Outcome`]: a Pass/Fail status and the observed setting. Rule categories
//! declare their simple attribute rules as tables of [`Check`]s and hand them
//! to [`EvaluationContext::apply`]. Rules needing more than the snapshot
//! (resolved parameters, ancillary data that may have failed to fetch) call
//! [`EvaluationContext::record`] and [`EvaluationContext::skip`] directly.
//!
//! The context turns outcomes into [`EvaluationResult`]s by looking the rule
//! up in the catalog. It also applies per-rule configuration: disabled rules
//! are neither evaluated nor recorded, and severity overrides replace the
//! catalog severity.

use tracing::warn;

use crate::catalog::RuleCatalog;
use crate::config::Config;
use crate::error::CatalogError;
use crate::parameters::ParameterResolver;
use crate::rules::maintenance::SafeWindow;
use crate::rules::patterns::SensitiveKeyScanner;
use crate::rules::results::{EvaluationResult, SkippedCheck, Status};

/// Status and observed value produced by one predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub observed: String,
}

impl Outcome {
    pub fn pass(observed: impl Into<String>) -> Self {
        Self {
            status: Status::Pass,
            observed: observed.into(),
        }
    }

    pub fn fail(observed: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            observed: observed.into(),
        }
    }

    /// Pass when `ok`, Fail otherwise, with the same observed value
    pub fn check(ok: bool, observed: impl Into<String>) -> Self {
        if ok {
            Self::pass(observed)
        } else {
            Self::fail(observed)
        }
    }

    /// Boolean flag rendered as `Enabled` / `Disabled`
    pub fn enabled(flag: bool) -> Self {
        Self::check(flag, if flag { "Enabled" } else { "Disabled" })
    }

    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }
}

/// A resource snapshot that can be named in a report row
pub trait Resource {
    fn resource_id(&self) -> String;
}

/// One table-driven rule: a rule id bound to its predicate
pub struct Check<R> {
    pub rule_id: &'static str,
    pub evaluate: fn(&R) -> Outcome,
}

/// Rule ids of a check table
pub fn rule_ids<R>(checks: &[Check<R>]) -> impl Iterator<Item = &'static str> + '_ {
    checks.iter().map(|c| c.rule_id)
}

/// Shared state for evaluating the rule categories of one run
pub struct EvaluationContext<'a> {
    catalog: &'a RuleCatalog,
    config: &'a Config,
    safe_window: SafeWindow,
    scanner: SensitiveKeyScanner,
    parameters: ParameterResolver<'a>,
    category: &'static str,
    results: Vec<EvaluationResult>,
    skipped: Vec<SkippedCheck>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        catalog: &'a RuleCatalog,
        config: &'a Config,
        safe_window: SafeWindow,
        parameters: ParameterResolver<'a>,
    ) -> Self {
        Self {
            catalog,
            config,
            safe_window,
            scanner: SensitiveKeyScanner::new(&config.sensitive.keywords),
            parameters,
            category: "",
            results: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Name the category whose rules are being recorded
    pub fn enter_category(&mut self, category: &'static str) {
        self.category = category;
    }

    pub fn safe_window(&self) -> &SafeWindow {
        &self.safe_window
    }

    pub fn sensitive_scanner(&self) -> &SensitiveKeyScanner {
        &self.scanner
    }

    pub fn parameters(&mut self) -> &mut ParameterResolver<'a> {
        &mut self.parameters
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.config.is_rule_enabled(rule_id)
    }

    /// Record the outcome of `rule_id` for one resource
    pub fn record(
        &mut self,
        rule_id: &str,
        resource_id: impl Into<String>,
        outcome: Outcome,
    ) -> Result<(), CatalogError> {
        if !self.is_enabled(rule_id) {
            return Ok(());
        }

        let rule = self.catalog.get(rule_id, self.category)?;
        let severity = self.config.rule_severity(rule_id).unwrap_or(rule.severity);

        self.results.push(EvaluationResult::new(
            rule_id,
            rule.service.clone(),
            outcome.status,
            severity,
            resource_id,
            outcome.observed,
            rule.issue.clone(),
        ));
        Ok(())
    }

    /// Evaluate every enabled check of a table against `resource`, in order
    pub fn apply<R: Resource>(
        &mut self,
        checks: &[Check<R>],
        resource: &R,
    ) -> Result<(), CatalogError> {
        let resource_id = resource.resource_id();
        for check in checks {
            if !self.is_enabled(check.rule_id) {
                continue;
            }
            let outcome = (check.evaluate)(resource);
            self.record(check.rule_id, resource_id.as_str(), outcome)?;
        }
        Ok(())
    }

    /// Record that `rule_id` could not be evaluated for one resource
    pub fn skip(&mut self, rule_id: &str, resource_id: impl Into<String>, reason: impl Into<String>) {
        if !self.is_enabled(rule_id) {
            return;
        }

        let resource_id = resource_id.into();
        let reason = reason.into();
        warn!(
            rule = rule_id,
            resource = %resource_id,
            reason = %reason,
            "Check skipped"
        );
        self.skipped.push(SkippedCheck {
            rule_id: rule_id.to_string(),
            resource_id,
            reason,
        });
    }

    /// Move out everything recorded so far
    pub fn drain(&mut self) -> (Vec<EvaluationResult>, Vec<SkippedCheck>) {
        (
            std::mem::take(&mut self.results),
            std::mem::take(&mut self.skipped),
        )
    }
}
