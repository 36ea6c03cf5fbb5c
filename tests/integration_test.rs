//! Integration tests for the cloudreview CLI

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cloudreview").unwrap();
    cmd.env_remove("CLOUDREVIEW_INVENTORY")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_inventory(dir: &TempDir, inventory: Value) -> PathBuf {
    write_fixture(dir, "inventory.json", &inventory.to_string())
}

/// One compliant bucket and one log bucket with an Alert and two Info failures
fn s3_inventory() -> Value {
    json!({
        "account_id": "123456789012",
        "s3": {
            "buckets": [
                {
                    "name": "app-assets",
                    "encryption_configured": true,
                    "public_access_block": true
                },
                {
                    "name": "app-logs",
                    "encryption_configured": false,
                    "public_access_block": true
                }
            ]
        }
    })
}

fn compliant_inventory() -> Value {
    json!({
        "s3": {
            "buckets": [
                {
                    "name": "app-assets",
                    "encryption_configured": true,
                    "public_access_block": true
                }
            ]
        }
    })
}

#[test]
fn test_service_audit_shows_table() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .arg("s3")
        .arg("-i")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Executing on AWS Account: 123456789012",
        ))
        .stdout(predicate::str::contains("| SERVICE | STATUS | LEVEL"))
        .stdout(predicate::str::contains("app-assets"))
        .stdout(predicate::str::contains("Not a log bucket"))
        .stdout(predicate::str::contains("S3: 8 checks shown, 5 passed, 3 failed"))
        .stdout(predicate::str::contains("No issues found.").not());
}

#[test]
fn test_fail_only_hides_passing_rows() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["--fail-only", "s3", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("app-logs"))
        .stdout(predicate::str::contains("app-assets").not())
        .stdout(predicate::str::contains("| Pass").not())
        .stdout(predicate::str::contains("3 checks shown"));
}

#[test]
fn test_fail_only_without_failures_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, compliant_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "-f", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_no_failures_prints_notice() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, compliant_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("S3: No issues found.\n"));
}

#[test]
fn test_fail_only_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, compliant_inventory());
    write_fixture(&temp_dir, ".cloudreview.toml", "fail_only = true\n");

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_is_emitted_even_when_empty() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, compliant_inventory());

    let output = get_cmd()
        .current_dir(temp_dir.path())
        .args(["--fail-only", "s3", "--format", "json", "-i"])
        .arg(&inventory)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["section"], "S3");
    assert_eq!(value["fail_only"], true);
    assert_eq!(value["account_id"], Value::Null);
    assert_eq!(value["results"], json!([]));
    assert_eq!(value["summary"]["failed"], 0);
}

#[test]
fn test_json_written_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    let report_path = temp_dir.path().join("report.json");

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["all", "--format", "json", "-i"])
        .arg(&inventory)
        .arg("-o")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Report written to"));

    let value: Value = serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(value["section"], "All Services");
    assert_eq!(value["summary"]["alert"], 1);
    // Two log bucket rules; the uncollected telemetry setting is skipped
    assert_eq!(value["summary"]["info"], 2);
    assert_eq!(value["skipped"][0]["rule_id"], "telemetry-resource-tags-enabled");
}

#[test]
fn test_observability_fails_only_when_enrichment_is_not_configured() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, json!({}));

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["observability", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled/Missing").not())
        .stderr(predicate::str::contains("Check skipped"));

    let inventory = write_inventory(
        &temp_dir,
        json!({ "observability": { "telemetry_enrichment": { "status": null } } }),
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["observability", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled/Missing"));
}

#[test]
fn test_exit_code_reflects_worst_failure() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .code(0);

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "--exit-code", "-i"])
        .arg(&inventory)
        .assert()
        .code(1);
}

#[test]
fn test_severity_override_changes_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    let config = write_fixture(
        &temp_dir,
        "review.toml",
        "[rules.\"s3-encryption\"]\nseverity = \"warning\"\n",
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .arg("-c")
        .arg(&config)
        .args(["s3", "--exit-code", "-i"])
        .arg(&inventory)
        .assert()
        .code(2);
}

#[test]
fn test_disabled_rule_is_not_reported() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    write_fixture(
        &temp_dir,
        ".cloudreview.toml",
        "[rules.\"s3-encryption\"]\nenabled = false\n",
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "--exit-code", "-i"])
        .arg(&inventory)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("6 checks shown"));
}

#[test]
fn test_malformed_rules_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    let rules = write_fixture(&temp_dir, "rules.yaml", "rules: [not, a, mapping\n");

    get_cmd()
        .current_dir(temp_dir.path())
        .arg("--rules")
        .arg(&rules)
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Rule catalog error"));
}

#[test]
fn test_missing_rule_definition_aborts_before_output() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    let rules = write_fixture(
        &temp_dir,
        "rules.yaml",
        "rules:\n  s3-encryption:\n    service: S3\n    level: Alert\n    issue: Default encryption is not configured\n",
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .arg("--rules")
        .arg(&rules)
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not defined in the rule catalog"));
}

#[test]
fn test_missing_inventory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["all", "-i", "does-not-exist.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read inventory"));
}

#[test]
fn test_inventory_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, compliant_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .env("CLOUDREVIEW_INVENTORY", &inventory)
        .arg("s3")
        .assert()
        .success()
        .stdout(predicate::str::contains("S3: No issues found."));
}

#[test]
fn test_unknown_service_filter_is_warned_and_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["all", "--only", "s3,iam", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown service 'iam' ignored"))
        .stdout(predicate::str::contains("All Services: 8 checks shown"));
}

#[test]
fn test_only_with_no_known_service_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["all", "--only", "iam", "-i"])
        .arg(&inventory)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown service 'iam' ignored"))
        .stderr(predicate::str::contains("--only names no known service"));
}

#[test]
fn test_misspelled_severity_override_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());
    write_fixture(
        &temp_dir,
        ".cloudreview.toml",
        "[rules.\"s3-encryption\"]\nseverity = \"critcal\"\n",
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["s3", "-i"])
        .arg(&inventory)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Configuration error"));
}

#[test]
fn test_skip_excludes_service() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(&temp_dir, s3_inventory());

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["all", "--skip", "s3,ec2,vpc", "-i"])
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("app-logs").not());
}

#[test]
fn test_unavailable_parameter_group_skips_checks() {
    let temp_dir = TempDir::new().unwrap();
    let inventory = write_inventory(
        &temp_dir,
        json!({
            "rds": {
                "instances": [{
                    "identifier": "orders-db",
                    "engine": "mysql",
                    "storage_encrypted": true,
                    "deletion_protection": true,
                    "tags": { "team": "orders" },
                    "enabled_cloudwatch_logs_exports": ["general", "slowquery", "audit", "error"],
                    "parameter_group": "orders-params",
                    "preferred_maintenance_window": "sun:14:00-sun:15:00"
                }]
            },
            "parameter_groups": {
                "instance": { "orders-params": { "error": "AccessDenied" } }
            }
        }),
    );

    let output = get_cmd()
        .current_dir(temp_dir.path())
        .args(["rds", "--format", "json", "-i"])
        .arg(&inventory)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Check skipped"), "stderr: {}", stderr);
    assert!(stderr.contains("AccessDenied"), "stderr: {}", stderr);

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let skipped: Vec<&str> = value["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        skipped,
        vec!["rds-general-log", "rds-slow-query-log", "rds-audit-log"]
    );

    let error_log = value["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["rule_id"] == "rds-error-log")
        .unwrap();
    assert_eq!(error_log["status"], "pass");
}

#[test]
fn test_rules_command_lists_catalog() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("rds-general-log"))
        .stdout(predicate::str::contains("telemetry-resource-tags-enabled"));
}

#[test]
fn test_version_flag() {
    get_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
