//! Elastic Load Balancing rules
//!
//! Only application load balancers are evaluated. Target health is reported
//! per target group as `lb > target-group`.

use tracing::debug;

use crate::error::CatalogError;
use crate::inventory::{Inventory, LoadBalancer, TargetHealth};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

const TARGET_HEALTH: &str = "elb-target-health";

/// Rules for application load balancers
pub struct ElbRules;

impl Resource for LoadBalancer {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

const LOAD_BALANCER_CHECKS: &[Check<LoadBalancer>] = &[
    Check {
        rule_id: "alb-access-logging",
        evaluate: |lb| Outcome::enabled(lb.attribute_enabled("access_logs.s3.enabled")),
    },
    Check {
        rule_id: "alb-connection-logging",
        evaluate: |lb| Outcome::enabled(lb.attribute_enabled("connection_logs.s3.enabled")),
    },
    Check {
        rule_id: "alb-deletion-protection",
        evaluate: |lb| Outcome::enabled(lb.attribute_enabled("deletion_protection.enabled")),
    },
];

/// Healthy when the group has targets and every one of them is `healthy`;
/// otherwise the observed value is `No targets` or the first bad state.
pub fn target_health(targets: &[TargetHealth]) -> Outcome {
    if targets.is_empty() {
        return Outcome::fail("No targets");
    }

    match targets
        .iter()
        .find(|t| !t.state.eq_ignore_ascii_case("healthy"))
    {
        Some(bad) => Outcome::fail(bad.state.as_str()),
        None => Outcome::pass("Healthy"),
    }
}

fn evaluate_target_groups(
    lb: &LoadBalancer,
    ctx: &mut EvaluationContext<'_>,
) -> Result<(), CatalogError> {
    let target_groups = match lb.target_groups.as_result() {
        Ok(groups) => groups,
        Err(error) => {
            ctx.skip(
                TARGET_HEALTH,
                lb.name.as_str(),
                format!("target groups unavailable: {}", error),
            );
            return Ok(());
        }
    };

    for tg in target_groups {
        let resource = format!("{} > {}", lb.name, tg.name);
        match tg.targets.as_result() {
            Ok(targets) => ctx.record(TARGET_HEALTH, resource, target_health(targets))?,
            Err(error) => ctx.skip(
                TARGET_HEALTH,
                resource,
                format!("target health unavailable: {}", error),
            ),
        }
    }

    Ok(())
}

#[async_trait::async_trait]
impl RuleCategory for ElbRules {
    fn name(&self) -> &'static str {
        "elb"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = rule_ids(LOAD_BALANCER_CHECKS).collect();
        ids.push(TARGET_HEALTH);
        ids
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for lb in &inventory.elb.load_balancers {
            if !lb.is_application() {
                debug!(load_balancer = %lb.name, lb_type = %lb.lb_type, "Not an ALB, skipping");
                continue;
            }

            ctx.apply(LOAD_BALANCER_CHECKS, lb)?;
            evaluate_target_groups(lb, ctx)?;
        }

        Ok(())
    }
}
