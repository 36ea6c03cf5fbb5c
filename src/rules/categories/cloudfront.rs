//! CloudFront rules
//!
//! A distribution is logged when standard logging is on, or when its default
//! cache behavior or any additional cache behavior has a real-time log
//! configuration attached.

use crate::error::CatalogError;
use crate::inventory::{Distribution, Inventory};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for CloudFront distributions
pub struct CloudFrontRules;

impl Resource for Distribution {
    fn resource_id(&self) -> String {
        self.id.clone()
    }
}

fn has_realtime_logging(distribution: &Distribution) -> bool {
    distribution
        .realtime_log_config_arn
        .iter()
        .chain(&distribution.cache_behavior_realtime_log_config_arns)
        .any(|arn| !arn.is_empty())
}

fn logging_outcome(distribution: &Distribution) -> Outcome {
    if distribution.standard_logging {
        Outcome::pass("Standard")
    } else if has_realtime_logging(distribution) {
        Outcome::pass("Real-time")
    } else {
        Outcome::fail("Disabled")
    }
}

const DISTRIBUTION_CHECKS: &[Check<Distribution>] = &[Check {
    rule_id: "cloudfront-logging-enabled",
    evaluate: logging_outcome,
}];

#[async_trait::async_trait]
impl RuleCategory for CloudFrontRules {
    fn name(&self) -> &'static str {
        "cloudfront"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(DISTRIBUTION_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for distribution in &inventory.cloudfront.distributions {
            ctx.apply(DISTRIBUTION_CHECKS, distribution)?;
        }
        Ok(())
    }
}
