//! RDS rules
//!
//! This module provides rules for RDS clusters and DB instances, including:
//! - Log exports cross-checked against engine parameters
//! - Maintenance window placement
//! - Storage encryption, deletion protection and tagging
//! - Public accessibility of DB instances
//!
//! Clusters are evaluated with their cluster parameter group. Instances that
//! belong to a cluster only get the public access check, since their cluster
//! row already covers the rest; standalone instances get the full set with
//! their instance parameter group.

use tracing::debug;

use crate::error::CatalogError;
use crate::inventory::{DbCluster, DbInstance, Inventory, ParameterScope, Tags};
use crate::parameters::ParameterSet;
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};
use crate::rules::maintenance::{is_window_valid, SafeWindow};

const GENERAL_LOG: &str = "rds-general-log";
const SLOW_QUERY_LOG: &str = "rds-slow-query-log";
const AUDIT_LOG: &str = "rds-audit-log";
const ERROR_LOG: &str = "rds-error-log";
const MAINTENANCE_WINDOW: &str = "rds-maintenance-window";

/// Log rules whose outcome depends on parameter values
const PARAMETER_LOG_RULES: &[&str] = &[GENERAL_LOG, SLOW_QUERY_LOG, AUDIT_LOG];

/// Export names engines use for their error log
const ERROR_LOG_EXPORTS: &[&str] = &["error", "postgresql", "alert"];

/// Rules for RDS clusters and DB instances
pub struct RdsRules;

/// The attributes clusters and standalone instances have in common
trait Database: Resource + Sync {
    fn identifier(&self) -> &str;
    fn exports(&self) -> &[String];
    fn parameter_group(&self) -> &str;
    fn maintenance_window(&self) -> &str;
    fn storage_encrypted(&self) -> bool;
    fn deletion_protection(&self) -> bool;
    fn tags(&self) -> &Tags;
}

macro_rules! impl_database {
    ($ty:ty) => {
        impl Resource for $ty {
            fn resource_id(&self) -> String {
                self.identifier.clone()
            }
        }

        impl Database for $ty {
            fn identifier(&self) -> &str {
                &self.identifier
            }
            fn exports(&self) -> &[String] {
                &self.enabled_cloudwatch_logs_exports
            }
            fn parameter_group(&self) -> &str {
                &self.parameter_group
            }
            fn maintenance_window(&self) -> &str {
                &self.preferred_maintenance_window
            }
            fn storage_encrypted(&self) -> bool {
                self.storage_encrypted
            }
            fn deletion_protection(&self) -> bool {
                self.deletion_protection
            }
            fn tags(&self) -> &Tags {
                &self.tags
            }
        }
    };
}

impl_database!(DbCluster);
impl_database!(DbInstance);

fn database_checks<D: Database>() -> [Check<D>; 3] {
    [
        Check {
            rule_id: "rds-storage-encrypted",
            evaluate: |db| Outcome::enabled(db.storage_encrypted()),
        },
        Check {
            rule_id: "rds-deletion-protection",
            evaluate: |db| Outcome::enabled(db.deletion_protection()),
        },
        Check {
            rule_id: "rds-tags",
            evaluate: |db| tag_outcome(db.tags()),
        },
    ]
}

const INSTANCE_CHECKS: &[Check<DbInstance>] = &[Check {
    rule_id: "rds-public-access",
    evaluate: |instance| {
        let public = instance.publicly_accessible;
        Outcome::check(!public, if public { "Public" } else { "Private" })
    },
}];

fn tag_outcome(tags: &Tags) -> Outcome {
    match tags.len() {
        0 => Outcome::fail("No tags"),
        1 => Outcome::pass("1 tag"),
        n => Outcome::pass(format!("{} tags", n)),
    }
}

/// Result of one log sub-check; `None` when it depends on parameters that
/// could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCheck {
    pub rule_id: &'static str,
    pub outcome: Option<Outcome>,
}

/// Evaluate the four log sub-checks of one database.
///
/// Each sub-check requires its log type to be exported. The general and
/// slow-query logs also need their engine parameter to be truthy. The audit
/// log passes when `server_audit_logging` is truthy or absent, since some
/// engines have no such parameter. The error log only needs one of its
/// export name variants.
pub fn check_logs(exports: &[String], params: &ParameterSet) -> [LogCheck; 4] {
    let exported = |name: &str| exports.iter().any(|e| e == name);

    [
        LogCheck {
            rule_id: GENERAL_LOG,
            outcome: parameter_log(exported("general"), params, "general_log", false),
        },
        LogCheck {
            rule_id: SLOW_QUERY_LOG,
            outcome: parameter_log(exported("slowquery"), params, "slow_query_log", false),
        },
        LogCheck {
            rule_id: AUDIT_LOG,
            outcome: parameter_log(exported("audit"), params, "server_audit_logging", true),
        },
        LogCheck {
            rule_id: ERROR_LOG,
            outcome: Some(export_outcome(
                ERROR_LOG_EXPORTS.iter().any(|&name| exported(name)),
            )),
        },
    ]
}

fn export_outcome(exported: bool) -> Outcome {
    if exported {
        Outcome::pass("Enabled")
    } else {
        Outcome::fail("Not exported")
    }
}

fn parameter_log(
    exported: bool,
    params: &ParameterSet,
    parameter: &str,
    absent_ok: bool,
) -> Option<Outcome> {
    if !exported {
        return Some(export_outcome(false));
    }
    if !params.is_available() {
        return None;
    }

    let outcome = match params.get(parameter) {
        None if absent_ok => Outcome::pass("Enabled"),
        None => Outcome::fail(format!("{} not set", parameter)),
        Some(_) if params.is_truthy(parameter) => Outcome::pass("Enabled"),
        Some(value) => Outcome::fail(format!("{} = {}", parameter, value)),
    };
    Some(outcome)
}

fn maintenance_outcome(descriptor: &str, safe: &SafeWindow) -> Outcome {
    let observed = if descriptor.is_empty() {
        "Not set"
    } else {
        descriptor
    };
    Outcome::check(is_window_valid(descriptor, safe), observed)
}

async fn evaluate_database<D: Database>(
    db: &D,
    scope: ParameterScope,
    ctx: &mut EvaluationContext<'_>,
) -> Result<(), CatalogError> {
    let identifier = db.identifier();
    let needs_parameters = PARAMETER_LOG_RULES.iter().any(|r| ctx.is_enabled(r));
    let params = if needs_parameters {
        ctx.parameters().resolve(db.parameter_group(), scope).await
    } else {
        ParameterSet::empty(db.parameter_group())
    };

    for check in check_logs(db.exports(), &params) {
        match check.outcome {
            Some(outcome) => ctx.record(check.rule_id, identifier, outcome)?,
            None => ctx.skip(
                check.rule_id,
                identifier,
                format!(
                    "{} parameter group '{}' unavailable: {}",
                    scope,
                    params.group(),
                    params.unavailable_reason().unwrap_or("unknown error")
                ),
            ),
        }
    }

    let window = maintenance_outcome(db.maintenance_window(), ctx.safe_window());
    ctx.record(MAINTENANCE_WINDOW, identifier, window)?;

    ctx.apply(&database_checks::<D>(), db)
}

#[async_trait::async_trait]
impl RuleCategory for RdsRules {
    fn name(&self) -> &'static str {
        "rds"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        let mut ids = vec![GENERAL_LOG, SLOW_QUERY_LOG, AUDIT_LOG, ERROR_LOG, MAINTENANCE_WINDOW];
        ids.extend(rule_ids(&database_checks::<DbCluster>()));
        ids.extend(rule_ids(INSTANCE_CHECKS));
        ids
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for cluster in &inventory.rds.clusters {
            evaluate_database(cluster, ParameterScope::Cluster, ctx).await?;
        }

        for instance in &inventory.rds.instances {
            ctx.apply(INSTANCE_CHECKS, instance)?;

            if instance.is_cluster_member() {
                debug!(
                    instance = %instance.identifier,
                    "Cluster member, remaining checks covered by its cluster"
                );
                continue;
            }

            evaluate_database(instance, ParameterScope::Instance, ctx).await?;
        }

        Ok(())
    }
}
