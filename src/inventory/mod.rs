//! # Inventory Module
//!
//! The boundary to the resource inventory collector. The collector (an
//! external program talking to the cloud provider APIs) produces a JSON
//! document describing every resource the rules inspect; this module
//! deserializes it into read-only snapshots and answers parameter-group
//! lookups from it.
//!
//! ## Contracts
//!
//! - [`Inventory`] - per-service resource snapshots
//! - [`ParameterSource`] - `DescribeParameters(group, scope)`; an empty list
//!   means the group has no parameters, an error means the lookup failed
//! - [`Fetched`] - ancillary data that may have failed to fetch for a single
//!   resource
//!
//! ## Document shape
//!
//! ```json
//! {
//!   "account_id": "123456789012",
//!   "rds": { "clusters": [ { "identifier": "orders", "parameter_group": "orders-params" } ] },
//!   "parameter_groups": {
//!     "cluster": {
//!       "orders-params": [ { "name": "general_log", "value": "1" } ],
//!       "broken-params": { "error": "AccessDenied" }
//!     }
//!   },
//!   "s3": { "buckets": [ { "name": "app-logs", "encryption_configured": true } ] }
//! }
//! ```

mod file;
pub mod resources;

pub use file::FileInventory;
pub use resources::*;

use serde::Deserialize;
use std::fmt;

/// Ancillary data fetched per resource by the collector.
///
/// Either the value itself or `{ "error": "..." }` when the collector could
/// not retrieve it. An object carrying an `error` key always reads as
/// [`Fetched::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Fetched<T> {
    Failed { error: String },
    Available(T),
}

impl<T> Fetched<T> {
    pub fn as_result(&self) -> Result<&T, &str> {
        match self {
            Self::Available(value) => Ok(value),
            Self::Failed { error } => Err(error.as_str()),
        }
    }
}

/// Which DescribeParameters API a group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterScope {
    Cluster,
    Instance,
}

impl fmt::Display for ParameterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster => f.write_str("cluster"),
            Self::Instance => f.write_str("instance"),
        }
    }
}

/// Remote parameter lookup consumed by the parameter resolver
#[async_trait::async_trait]
pub trait ParameterSource: Send + Sync {
    /// Return the `(name, value)` pairs of a parameter group.
    ///
    /// Parameters without a value are omitted. A group with no parameters
    /// yields an empty list, not an error.
    async fn describe_parameters(
        &self,
        group_name: &str,
        scope: ParameterScope,
    ) -> anyhow::Result<Vec<(String, String)>>;
}

/// The full resource inventory for one run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub account_id: Option<String>,
    pub rds: RdsInventory,
    pub parameter_groups: ParameterGroups,
    pub ecs: EcsInventory,
    pub elb: ElbInventory,
    pub s3: S3Inventory,
    pub ec2: Ec2Inventory,
    pub vpc: VpcInventory,
    pub ecr: EcrInventory,
    pub cloudwatch_logs: CloudWatchLogsInventory,
    pub route53: Route53Inventory,
    pub cloudfront: CloudFrontInventory,
    pub wafv2: Wafv2Inventory,
    pub observability: ObservabilityInventory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetched_reads_error_object_as_failed() {
        let fetched: Fetched<TaskDefinition> =
            serde_json::from_value(json!({ "error": "AccessDenied" })).unwrap();
        assert_eq!(fetched.as_result().unwrap_err(), "AccessDenied");
    }

    #[test]
    fn test_fetched_reads_value_as_available() {
        let fetched: Fetched<TaskDefinition> = serde_json::from_value(json!({
            "family": "api",
            "cpu_architecture": "ARM64"
        }))
        .unwrap();
        let td = fetched.as_result().unwrap();
        assert_eq!(td.family, "api");
        assert_eq!(td.cpu_architecture.as_deref(), Some("ARM64"));
    }

    #[test]
    fn test_fetched_reads_empty_list_as_available() {
        let fetched: Fetched<Vec<ParameterEntry>> = serde_json::from_value(json!([])).unwrap();
        assert!(fetched.as_result().unwrap().is_empty());
    }

    #[test]
    fn test_inventory_sections_are_optional() {
        let inventory: Inventory = serde_json::from_value(json!({
            "s3": { "buckets": [ { "name": "assets" } ] }
        }))
        .unwrap();

        assert!(inventory.account_id.is_none());
        assert_eq!(inventory.s3.buckets.len(), 1);
        assert!(!inventory.s3.buckets[0].encryption_configured);
        assert!(inventory.rds.clusters.is_empty());
    }

    #[test]
    fn test_load_balancer_defaults_to_application() {
        let inventory: Inventory = serde_json::from_value(json!({
            "elb": { "load_balancers": [
                { "name": "web", "attributes": { "access_logs.s3.enabled": "true" } },
                { "name": "nlb", "type": "network" }
            ] }
        }))
        .unwrap();

        let lbs = &inventory.elb.load_balancers;
        assert!(lbs[0].is_application());
        assert!(lbs[0].attribute_enabled("access_logs.s3.enabled"));
        assert!(!lbs[0].attribute_enabled("deletion_protection.enabled"));
        assert!(!lbs[1].is_application());
    }

    #[test]
    fn test_web_acl_scope_aliases() {
        let acl: WebAcl =
            serde_json::from_value(json!({ "name": "edge", "scope": "CLOUDFRONT" })).unwrap();
        assert_eq!(acl.scope, WebAclScope::CloudFront);
        assert_eq!(acl.scope.label(), "CloudFront");
    }

    #[test]
    fn test_cluster_membership() {
        let member = DbInstance {
            cluster_identifier: Some("orders".to_string()),
            ..Default::default()
        };
        let standalone = DbInstance::default();
        assert!(member.is_cluster_member());
        assert!(!standalone.is_cluster_member());
    }
}
