//! EC2 rules
//!
//! Account-level EBS encryption by default, then encryption of every volume
//! and snapshot.

use crate::error::CatalogError;
use crate::inventory::{Inventory, Snapshot, Volume};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};

const DEFAULT_ENCRYPTION: &str = "ec2-ebs-default-encryption";

/// Resource id of account-level settings
const ACCOUNT: &str = "Account";

/// Rules for EBS encryption
pub struct Ec2Rules;

impl Resource for Volume {
    fn resource_id(&self) -> String {
        self.id.clone()
    }
}

impl Resource for Snapshot {
    fn resource_id(&self) -> String {
        self.id.clone()
    }
}

const VOLUME_CHECKS: &[Check<Volume>] = &[Check {
    rule_id: "ec2-volume-encryption",
    evaluate: |v| Outcome::enabled(v.encrypted),
}];

const SNAPSHOT_CHECKS: &[Check<Snapshot>] = &[Check {
    rule_id: "ec2-snapshot-encryption",
    evaluate: |s| Outcome::enabled(s.encrypted),
}];

#[async_trait::async_trait]
impl RuleCategory for Ec2Rules {
    fn name(&self) -> &'static str {
        "ec2"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        let mut ids = vec![DEFAULT_ENCRYPTION];
        ids.extend(rule_ids(VOLUME_CHECKS));
        ids.extend(rule_ids(SNAPSHOT_CHECKS));
        ids
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        let ec2 = &inventory.ec2;

        match ec2.ebs_encryption_by_default {
            Some(enabled) => ctx.record(DEFAULT_ENCRYPTION, ACCOUNT, Outcome::enabled(enabled))?,
            None => ctx.skip(
                DEFAULT_ENCRYPTION,
                ACCOUNT,
                "EBS encryption by default was not collected",
            ),
        }

        for volume in &ec2.volumes {
            ctx.apply(VOLUME_CHECKS, volume)?;
        }
        for snapshot in &ec2.snapshots {
            ctx.apply(SNAPSHOT_CHECKS, snapshot)?;
        }

        Ok(())
    }
}
