//! Rules evaluation engine

use tracing::{debug, info, span, Instrument, Level};

use super::categories;
use super::evaluator::EvaluationContext;
use super::results::{Report, Severity};
use crate::catalog::RuleCatalog;
use crate::config::Config;
use crate::error::{CatalogError, CloudReviewError};
use crate::inventory::{Inventory, ParameterSource};
use crate::parameters::{ParameterCache, ParameterResolver};

/// Trait for rule categories
#[async_trait::async_trait]
pub trait RuleCategory: Send + Sync {
    /// Get the category name, as accepted by `--only` and `--skip`
    fn name(&self) -> &'static str;

    /// Every rule id this category can record
    fn rule_ids(&self) -> Vec<&'static str>;

    /// Run the rules in this category
    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError>;
}

/// Main rules evaluation engine
pub struct RulesEngine {
    catalog: RuleCatalog,
    config: Config,
    fail_only: bool,
    only_categories: Option<Vec<String>>,
    skip_categories: Option<Vec<String>>,
}

impl RulesEngine {
    /// Create a new rules engine over a loaded catalog and configuration
    pub fn new(catalog: RuleCatalog, config: Config) -> Self {
        let fail_only = config.fail_only;
        Self {
            catalog,
            config,
            fail_only,
            only_categories: None,
            skip_categories: None,
        }
    }

    /// Keep only failing rows in the report
    pub fn set_fail_only(&mut self, fail_only: bool) {
        self.fail_only = fail_only;
    }

    /// Set categories to exclusively run
    pub fn set_only_categories(&mut self, categories: Vec<String>) {
        self.only_categories = Some(categories);
    }

    /// Set categories to skip
    pub fn set_skip_categories(&mut self, categories: Vec<String>) {
        self.skip_categories = Some(categories);
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Check if a category should be run
    fn should_run_category(&self, category: &str) -> bool {
        if let Some(only) = &self.only_categories {
            return only.iter().any(|c| c == category);
        }

        if let Some(skip) = &self.skip_categories {
            return !skip.iter().any(|c| c == category);
        }

        true
    }

    /// Run every selected category with a fresh parameter cache
    pub async fn run(
        &self,
        inventory: &Inventory,
        source: &dyn ParameterSource,
    ) -> Result<Report, CloudReviewError> {
        let mut cache = ParameterCache::new();
        self.run_with_cache(inventory, source, &mut cache).await
    }

    /// Run every selected category, resolving parameter groups through `cache`.
    ///
    /// Fails before evaluating anything if a selected category references a
    /// rule the catalog does not define.
    pub async fn run_with_cache(
        &self,
        inventory: &Inventory,
        source: &dyn ParameterSource,
        cache: &mut ParameterCache,
    ) -> Result<Report, CloudReviewError> {
        let categories: Vec<_> = categories::all()
            .into_iter()
            .filter(|c| {
                let run = self.should_run_category(c.name());
                if !run {
                    debug!(category = c.name(), "Skipping category");
                }
                run
            })
            .collect();

        for category in &categories {
            self.catalog
                .ensure_defined(&category.rule_ids(), category.name())?;
        }

        let safe_window = self.config.maintenance_window.safe_window()?;
        info!(
            categories = categories.len(),
            rules = self.catalog.len(),
            fail_only = self.fail_only,
            "Starting evaluation"
        );

        let mut report = Report::new(self.fail_only);
        let mut ctx = EvaluationContext::new(
            &self.catalog,
            &self.config,
            safe_window,
            ParameterResolver::new(source, cache),
        );

        for category in &categories {
            let category_name = category.name();
            let span = span!(Level::INFO, "category", category = category_name);

            ctx.enter_category(category_name);
            category
                .run(inventory, &mut ctx)
                .instrument(span)
                .await?;

            let (results, skipped) = ctx.drain();
            debug!(
                category = category_name,
                results = results.len(),
                skipped = skipped.len(),
                "Category completed"
            );
            report.add_all(results);
            report.add_skipped(skipped);
        }

        info!(
            "Evaluation complete: {} alert, {} warning, {} info failures, {} skipped",
            report.count_failed_by_severity(Severity::Alert),
            report.count_failed_by_severity(Severity::Warning),
            report.count_failed_by_severity(Severity::Info),
            report.skipped().len(),
        );

        Ok(report)
    }
}
