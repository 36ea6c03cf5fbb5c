//! ECR rules

use crate::error::CatalogError;
use crate::inventory::{Inventory, Repository};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for ECR repositories
pub struct EcrRules;

impl Resource for Repository {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

const REPOSITORY_CHECKS: &[Check<Repository>] = &[
    Check {
        rule_id: "ecr-tag-immutability",
        evaluate: |repo| {
            let mutability = if repo.image_tag_mutability.is_empty() {
                "MUTABLE"
            } else {
                repo.image_tag_mutability.as_str()
            };
            Outcome::check(mutability.eq_ignore_ascii_case("IMMUTABLE"), mutability)
        },
    },
    Check {
        rule_id: "ecr-scan-on-push",
        evaluate: |repo| Outcome::enabled(repo.scan_on_push),
    },
    Check {
        rule_id: "ecr-lifecycle-policy",
        evaluate: |repo| Outcome::check(
            repo.lifecycle_policy,
            if repo.lifecycle_policy { "Set" } else { "Not set" },
        ),
    },
];

#[async_trait::async_trait]
impl RuleCategory for EcrRules {
    fn name(&self) -> &'static str {
        "ecr"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(REPOSITORY_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for repository in &inventory.ecr.repositories {
            ctx.apply(REPOSITORY_CHECKS, repository)?;
        }
        Ok(())
    }
}
