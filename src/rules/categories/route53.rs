//! Route 53 rules

use crate::error::CatalogError;
use crate::inventory::{HostedZone, Inventory};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for Route 53 hosted zones
pub struct Route53Rules;

impl Resource for HostedZone {
    fn resource_id(&self) -> String {
        if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name.clone()
        }
    }
}

const ZONE_CHECKS: &[Check<HostedZone>] = &[Check {
    rule_id: "route53-query-logging",
    evaluate: |zone| Outcome::enabled(!zone.query_logging_configs.is_empty()),
}];

#[async_trait::async_trait]
impl RuleCategory for Route53Rules {
    fn name(&self) -> &'static str {
        "route53"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(ZONE_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for zone in &inventory.route53.hosted_zones {
            ctx.apply(ZONE_CHECKS, zone)?;
        }
        Ok(())
    }
}
