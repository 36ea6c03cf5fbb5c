//! Observability rules
//!
//! Account-level telemetry settings, reported against the `Account` resource.

use crate::error::CatalogError;
use crate::inventory::{Inventory, TelemetryEnrichment};
use crate::rules::engine::RuleCategory;
use crate::rules::evaluator::{EvaluationContext, Outcome};

const TELEMETRY_RESOURCE_TAGS: &str = "telemetry-resource-tags-enabled";
const ACCOUNT: &str = "Account";

/// Rules for CloudWatch telemetry configuration
pub struct ObservabilityRules;

/// A status-less answer means enrichment was never configured for the account
fn telemetry_status(enrichment: &TelemetryEnrichment) -> Outcome {
    match enrichment.status.as_deref() {
        None | Some("") => Outcome::fail("Disabled/Missing"),
        Some(status) => Outcome::check(status == "Running", status),
    }
}

#[async_trait::async_trait]
impl RuleCategory for ObservabilityRules {
    fn name(&self) -> &'static str {
        "observability"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        vec![TELEMETRY_RESOURCE_TAGS]
    }

    async fn run(
        &self,
        inventory: &Inventory,
        ctx: &mut EvaluationContext<'_>,
    ) -> Result<(), CatalogError> {
        let Some(enrichment) = &inventory.observability.telemetry_enrichment else {
            ctx.skip(
                TELEMETRY_RESOURCE_TAGS,
                ACCOUNT,
                "telemetry enrichment status was not collected",
            );
            return Ok(());
        };

        match enrichment.as_result() {
            Ok(enrichment) => {
                ctx.record(TELEMETRY_RESOURCE_TAGS, ACCOUNT, telemetry_status(enrichment))
            }
            Err(error) => {
                let reason = format!("telemetry enrichment status unavailable: {}", error);
                ctx.skip(TELEMETRY_RESOURCE_TAGS, ACCOUNT, reason);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::categories::testing::run_category;
    use crate::rules::results::Status;
    use serde_json::json;

    fn inventory(observability: serde_json::Value) -> Inventory {
        serde_json::from_value(json!({ "observability": observability })).unwrap()
    }

    async fn status_row(observability: serde_json::Value) -> (Status, String) {
        let (results, skipped) = run_category(&ObservabilityRules, inventory(observability)).await;
        assert!(skipped.is_empty());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].resource_id, "Account");
        (results[0].status, results[0].observed.clone())
    }

    #[tokio::test]
    async fn test_running_passes() {
        assert_eq!(
            status_row(json!({ "telemetry_enrichment": { "status": "Running" } })).await,
            (Status::Pass, "Running".to_string())
        );
    }

    #[tokio::test]
    async fn test_stopped_fails_with_status() {
        assert_eq!(
            status_row(json!({ "telemetry_enrichment": { "status": "Stopped" } })).await,
            (Status::Fail, "Stopped".to_string())
        );
    }

    #[tokio::test]
    async fn test_never_configured_fails() {
        assert_eq!(
            status_row(json!({ "telemetry_enrichment": { "status": null } })).await,
            (Status::Fail, "Disabled/Missing".to_string())
        );
        assert_eq!(
            status_row(json!({ "telemetry_enrichment": {} })).await,
            (Status::Fail, "Disabled/Missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_uncollected_status_is_skipped() {
        let (results, skipped) = run_category(&ObservabilityRules, Inventory::default()).await;

        assert!(results.is_empty());
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].rule_id, TELEMETRY_RESOURCE_TAGS);
        assert_eq!(skipped[0].resource_id, "Account");
    }

    #[tokio::test]
    async fn test_failed_lookup_is_skipped_with_error() {
        let inventory = inventory(json!({
            "telemetry_enrichment": { "error": "AccessDeniedException" }
        }));
        let (results, skipped) = run_category(&ObservabilityRules, inventory).await;

        assert!(results.is_empty());
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].reason.contains("AccessDeniedException"));
    }
}
