//! CloudWatch Logs rules

use crate::error::CatalogError;
use crate::inventory::{Inventory, LogGroup};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for CloudWatch Logs log groups
pub struct LogsRules;

impl Resource for LogGroup {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

const LOG_GROUP_CHECKS: &[Check<LogGroup>] = &[Check {
    rule_id: "cloudwatchlogs-retention",
    evaluate: |group| match group.retention_in_days {
        Some(days) => Outcome::pass(format!("{} days", days)),
        None => Outcome::fail("Never expire"),
    },
}];

#[async_trait::async_trait]
impl RuleCategory for LogsRules {
    fn name(&self) -> &'static str {
        "logs"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(LOG_GROUP_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for group in &inventory.cloudwatch_logs.log_groups {
            ctx.apply(LOG_GROUP_CHECKS, group)?;
        }
        Ok(())
    }
}
