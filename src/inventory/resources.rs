//! Resource snapshots
//!
//! Read-only descriptions of cloud resources as supplied by the inventory
//! collector. Each type carries exactly the attributes the rule categories
//! inspect; everything optional defaults so partial collector output still
//! deserializes.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::Fetched;

/// Resource tags, key -> value
pub type Tags = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// RDS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RdsInventory {
    pub clusters: Vec<DbCluster>,
    pub instances: Vec<DbInstance>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DbCluster {
    pub identifier: String,
    pub engine: String,
    pub storage_encrypted: bool,
    pub deletion_protection: bool,
    pub tags: Tags,
    pub enabled_cloudwatch_logs_exports: Vec<String>,
    /// Cluster parameter group name
    pub parameter_group: String,
    pub preferred_maintenance_window: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DbInstance {
    pub identifier: String,
    pub engine: String,
    /// Set when the instance belongs to a cluster
    pub cluster_identifier: Option<String>,
    pub storage_encrypted: bool,
    pub deletion_protection: bool,
    pub publicly_accessible: bool,
    pub tags: Tags,
    pub enabled_cloudwatch_logs_exports: Vec<String>,
    /// Instance parameter group name
    pub parameter_group: String,
    pub preferred_maintenance_window: String,
}

impl DbInstance {
    pub fn is_cluster_member(&self) -> bool {
        self.cluster_identifier
            .as_deref()
            .map(|c| !c.is_empty())
            .unwrap_or(false)
    }
}

/// One entry of a DescribeParameters response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Parameter groups by scope, then by group name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParameterGroups {
    pub cluster: BTreeMap<String, Fetched<Vec<ParameterEntry>>>,
    pub instance: BTreeMap<String, Fetched<Vec<ParameterEntry>>>,
}

// ---------------------------------------------------------------------------
// ECS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EcsInventory {
    pub clusters: Vec<EcsCluster>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EcsCluster {
    pub name: String,
    pub container_insights: bool,
    /// Execute-command logging mode (NONE, DEFAULT, OVERRIDE); absent when
    /// the cluster has no execute-command configuration
    pub exec_logging: Option<String>,
    pub services: Vec<EcsService>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EcsService {
    pub name: String,
    pub circuit_breaker: bool,
    pub propagate_tags: String,
    /// Absent when the service has no task definition
    pub task_definition: Option<Fetched<TaskDefinition>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskDefinition {
    pub family: String,
    pub cpu_architecture: Option<String>,
    pub containers: Vec<ContainerDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContainerDefinition {
    pub name: String,
    pub environment: Vec<EnvironmentVariable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Elastic Load Balancing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElbInventory {
    pub load_balancers: Vec<LoadBalancer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub name: String,
    /// application, network or gateway
    #[serde(rename = "type")]
    pub lb_type: String,
    pub attributes: BTreeMap<String, String>,
    pub target_groups: Fetched<Vec<TargetGroup>>,
}

impl Default for LoadBalancer {
    fn default() -> Self {
        Self {
            name: String::new(),
            lb_type: "application".to_string(),
            attributes: BTreeMap::new(),
            target_groups: Fetched::Available(Vec::new()),
        }
    }
}

impl LoadBalancer {
    pub fn is_application(&self) -> bool {
        self.lb_type.eq_ignore_ascii_case("application")
    }

    /// Whether attribute `key` is set to `true`
    pub fn attribute_enabled(&self, key: &str) -> bool {
        self.attributes
            .get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetGroup {
    pub name: String,
    pub targets: Fetched<Vec<TargetHealth>>,
}

impl Default for TargetGroup {
    fn default() -> Self {
        Self {
            name: String::new(),
            targets: Fetched::Available(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetHealth {
    pub id: String,
    pub state: String,
}

// ---------------------------------------------------------------------------
// S3
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct S3Inventory {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bucket {
    pub name: String,
    pub encryption_configured: bool,
    pub public_access_block: bool,
    pub lifecycle_configured: bool,
    pub object_lock_enabled: bool,
}

impl Bucket {
    pub fn is_log_bucket(&self) -> bool {
        self.name.contains("log")
    }
}

// ---------------------------------------------------------------------------
// EC2
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ec2Inventory {
    /// Absent when the collector did not query the account setting
    pub ebs_encryption_by_default: Option<bool>,
    pub volumes: Vec<Volume>,
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub id: String,
    pub encrypted: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub id: String,
    pub encrypted: bool,
}

// ---------------------------------------------------------------------------
// VPC
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VpcInventory {
    pub vpcs: Vec<Vpc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Vpc {
    pub id: String,
    pub tags: Tags,
    pub enable_dns_hostnames: bool,
    pub enable_dns_support: bool,
    pub flow_logs: Vec<FlowLog>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlowLog {
    pub id: String,
    pub log_format: Option<String>,
}

// ---------------------------------------------------------------------------
// ECR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EcrInventory {
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    /// MUTABLE or IMMUTABLE
    pub image_tag_mutability: String,
    pub scan_on_push: bool,
    pub lifecycle_policy: bool,
}

// ---------------------------------------------------------------------------
// CloudWatch Logs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CloudWatchLogsInventory {
    pub log_groups: Vec<LogGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogGroup {
    pub name: String,
    pub retention_in_days: Option<u32>,
}

// ---------------------------------------------------------------------------
// Route 53
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Route53Inventory {
    pub hosted_zones: Vec<HostedZone>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostedZone {
    pub id: String,
    pub name: String,
    pub private_zone: bool,
    pub query_logging_configs: Vec<String>,
}

// ---------------------------------------------------------------------------
// CloudFront
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CloudFrontInventory {
    pub distributions: Vec<Distribution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Distribution {
    pub id: String,
    pub standard_logging: bool,
    /// Real-time log config ARN of the default cache behavior
    pub realtime_log_config_arn: Option<String>,
    /// Real-time log config ARNs of the additional cache behaviors
    pub cache_behavior_realtime_log_config_arns: Vec<String>,
}

// ---------------------------------------------------------------------------
// WAFv2
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Wafv2Inventory {
    pub web_acls: Vec<WebAcl>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum WebAclScope {
    #[default]
    #[serde(alias = "REGIONAL", alias = "regional")]
    Regional,
    #[serde(alias = "CLOUDFRONT", alias = "cloudfront")]
    CloudFront,
}

impl WebAclScope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regional => "Regional",
            Self::CloudFront => "CloudFront",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebAcl {
    pub name: String,
    pub arn: String,
    pub scope: WebAclScope,
    pub logging_enabled: bool,
}

// ---------------------------------------------------------------------------
// Observability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservabilityInventory {
    /// Result of the telemetry enrichment status lookup; absent when it was
    /// not collected
    pub telemetry_enrichment: Option<Fetched<TelemetryEnrichment>>,
}

/// Account telemetry enrichment setting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryEnrichment {
    /// Running, Stopped or Impaired; `None` when the account reported that
    /// enrichment was never configured
    pub status: Option<String>,
}
