//! VPC rules

use crate::error::CatalogError;
use crate::inventory::{FlowLog, Inventory, Vpc};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Fields a flow log format must capture
pub const REQUIRED_FLOW_LOG_FIELDS: &[&str] =
    &["tcp-flags", "pkt-srcaddr", "pkt-dstaddr", "flow-direction"];

/// Rules for VPCs
pub struct VpcRules;

impl Resource for Vpc {
    fn resource_id(&self) -> String {
        self.id.clone()
    }
}

fn has_required_fields(flow_log: &FlowLog) -> bool {
    flow_log
        .log_format
        .as_deref()
        .map(|format| {
            REQUIRED_FLOW_LOG_FIELDS
                .iter()
                .all(|field| format.contains(field))
        })
        .unwrap_or(false)
}

const VPC_CHECKS: &[Check<Vpc>] = &[
    Check {
        rule_id: "vpc-name-tag",
        evaluate: |vpc| match vpc.tags.get("Name") {
            Some(name) => Outcome::pass(name.as_str()),
            None => Outcome::fail("Not set"),
        },
    },
    Check {
        rule_id: "vpc-dns-hostnames",
        evaluate: |vpc| Outcome::enabled(vpc.enable_dns_hostnames),
    },
    Check {
        rule_id: "vpc-dns-support",
        evaluate: |vpc| Outcome::enabled(vpc.enable_dns_support),
    },
    Check {
        rule_id: "vpc-flow-logs",
        evaluate: |vpc| Outcome::enabled(!vpc.flow_logs.is_empty()),
    },
    Check {
        rule_id: "vpc-flow-log-format",
        evaluate: |vpc| {
            if vpc.flow_logs.iter().any(has_required_fields) {
                Outcome::pass("Custom")
            } else {
                Outcome::fail("Default")
            }
        },
    },
];

#[async_trait::async_trait]
impl RuleCategory for VpcRules {
    fn name(&self) -> &'static str {
        "vpc"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(VPC_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for vpc in &inventory.vpc.vpcs {
            ctx.apply(VPC_CHECKS, vpc)?;
        }
        Ok(())
    }
}
