//! S3 rules
//!
//! Lifecycle and object lock only matter for buckets holding logs, detected by
//! `log` in the bucket name. Other buckets pass those rules as
//! `Not a log bucket`.

use crate::error::CatalogError;
use crate::inventory::{Bucket, Inventory};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

/// Rules for S3 buckets
pub struct S3Rules;

impl Resource for Bucket {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

fn log_bucket_only(bucket: &Bucket, flag: bool) -> Outcome {
    if bucket.is_log_bucket() {
        Outcome::enabled(flag)
    } else {
        Outcome::pass("Not a log bucket")
    }
}

const BUCKET_CHECKS: &[Check<Bucket>] = &[
    Check {
        rule_id: "s3-encryption",
        evaluate: |b| Outcome::enabled(b.encryption_configured),
    },
    Check {
        rule_id: "s3-public-access",
        evaluate: |b| Outcome::enabled(b.public_access_block),
    },
    Check {
        rule_id: "s3-lifecycle",
        evaluate: |b| log_bucket_only(b, b.lifecycle_configured),
    },
    Check {
        rule_id: "s3-object-lock",
        evaluate: |b| log_bucket_only(b, b.object_lock_enabled),
    },
];

#[async_trait::async_trait]
impl RuleCategory for S3Rules {
    fn name(&self) -> &'static str {
        "s3"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        rule_ids(BUCKET_CHECKS).collect()
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for bucket in &inventory.s3.buckets {
            ctx.apply(BUCKET_CHECKS, bucket)?;
        }
        Ok(())
    }
}
