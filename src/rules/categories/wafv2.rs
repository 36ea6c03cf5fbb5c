//! WAFv2 rules

use crate::error::CatalogError;
use crate::inventory::{Inventory, WebAcl};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for WAFv2 web ACLs
pub struct Wafv2Rules;

impl Resource for WebAcl {
    /// `name (Regional)` or `name (CloudFront)`
    fn resource_id(&self) -> String {
        format!("{} ({})", self.name, self.scope.label())
    }
}

const WEB_ACL_CHECKS: &[Check<WebAcl>] = &[Check {
    rule_id: "wafv2-logging-enabled",
    evaluate: |acl| Outcome::enabled(acl.logging_enabled),
}];

#[async_trait::async_trait]
impl RuleCategory for Wafv2Rules {
    fn name(&self) -> &'static str {
        "wafv2"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(WEB_ACL_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for acl in &inventory.wafv2.web_acls {
            ctx.apply(WEB_ACL_CHECKS, acl)?;
        }
        Ok(())
    }
}
