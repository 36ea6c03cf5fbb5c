//! ECS rules
//!
//! Cluster rules (Container Insights, execute-command logging) and service
//! rules (deployment circuit breaker, tag propagation). Rules reading the
//! task definition, CPU architecture and sensitive environment variables,
//! are skipped for a service whose task definition could not be fetched.

use crate::error::CatalogError;
use crate::inventory::{EcsCluster, EcsService, Inventory, TaskDefinition};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{rule_ids, Check, EvaluationContext, Outcome, Resource};
use crate::rules::patterns::SensitiveKeyScanner;

const CPU_ARCHITECTURE: &str = "ecs-cpu-architecture";
const SENSITIVE_ENVIRONMENT: &str = "ecs-sensitive-environment-variables";

/// Rules for ECS clusters and services
pub struct EcsRules;

impl Resource for EcsCluster {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

impl Resource for EcsService {
    fn resource_id(&self) -> String {
        self.name.clone()
    }
}

const CLUSTER_CHECKS: &[Check<EcsCluster>] = &[
    Check {
        rule_id: "ecs-container-insights",
        evaluate: |cluster| Outcome::enabled(cluster.container_insights),
    },
    Check {
        rule_id: "ecs-exec-logging",
        evaluate: |cluster| {
            let enabled = cluster
                .exec_logging
                .as_deref()
                .map(|mode| !mode.eq_ignore_ascii_case("NONE"))
                .unwrap_or(false);
            Outcome::enabled(enabled)
        },
    },
];

const SERVICE_CHECKS: &[Check<EcsService>] = &[
    Check {
        rule_id: "ecs-service-circuit-breaker",
        evaluate: |service| Outcome::enabled(service.circuit_breaker),
    },
    Check {
        rule_id: "ecs-propagate-tags",
        evaluate: |service| {
            let value = if service.propagate_tags.is_empty() {
                "NONE"
            } else {
                service.propagate_tags.as_str()
            };
            Outcome::check(!value.eq_ignore_ascii_case("NONE"), value)
        },
    },
];

fn cpu_architecture(task_definition: &TaskDefinition) -> Outcome {
    let arch = task_definition
        .cpu_architecture
        .as_deref()
        .unwrap_or("Unknown");
    Outcome::check(arch.eq_ignore_ascii_case("ARM64"), arch)
}

/// Flag a task definition whose environment variable names look like secrets.
///
/// Every container is scanned; the observed value lists each matching name.
pub fn check_sensitive_environment_variables(
    task_definition: &TaskDefinition,
    scanner: &SensitiveKeyScanner,
) -> Outcome {
    let keys = task_definition
        .containers
        .iter()
        .flat_map(|c| c.environment.iter().map(|e| e.name.as_str()));
    let found = scanner.scan(keys);

    if found.is_empty() {
        Outcome::pass("Safe")
    } else {
        Outcome::fail(format!("Found: {}", found.join(", ")))
    }
}

fn evaluate_service(
    service: &EcsService,
    ctx: &mut EvaluationContext<'_>,
) -> Result<(), CatalogError> {
    ctx.apply(SERVICE_CHECKS, service)?;

    let Some(task_definition) = &service.task_definition else {
        return Ok(());
    };

    match task_definition.as_result() {
        Ok(td) => {
            ctx.record(CPU_ARCHITECTURE, service.name.as_str(), cpu_architecture(td))?;
            let sensitive = check_sensitive_environment_variables(td, ctx.sensitive_scanner());
            ctx.record(SENSITIVE_ENVIRONMENT, service.name.as_str(), sensitive)?;
        }
        Err(error) => {
            let reason = format!("task definition unavailable: {}", error);
            ctx.skip(CPU_ARCHITECTURE, service.name.as_str(), reason.as_str());
            ctx.skip(SENSITIVE_ENVIRONMENT, service.name.as_str(), reason);
        }
    }

    Ok(())
}

#[async_trait::async_trait]
impl RuleCategory for EcsRules {
    fn name(&self) -> &'static str {
        "ecs"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = rule_ids(CLUSTER_CHECKS).collect();
        ids.extend(rule_ids(SERVICE_CHECKS));
        ids.extend([CPU_ARCHITECTURE, SENSITIVE_ENVIRONMENT]);
        ids
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        for cluster in &inventory.ecs.clusters {
            ctx.apply(CLUSTER_CHECKS, cluster)?;

            for service in &cluster.services {
                evaluate_service(service, ctx)?;
            }
        }

        Ok(())
    }
}
