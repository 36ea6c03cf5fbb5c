//! Exit codes for the cloudreview CLI
//!
//! This module defines standardized exit codes used by the CLI to indicate
//! the result of an audit. These codes enable integration with CI/CD
//! pipelines and scripts.
//!
//! Codes 1 and 2 are only returned when `--exit-code` is passed; otherwise a
//! completed audit always exits with [`SUCCESS`].

use crate::rules::results::{Report, Severity};

/// Success - audit completed
///
/// Used when:
/// - The audit completed and `--exit-code` was not requested
/// - The audit found no failures, or only Info-level failures
/// - The rule catalog was listed
pub const SUCCESS: i32 = 0;

/// Failing checks with Alert severity were found
///
/// Used when `--exit-code` was requested and at least one Alert-level
/// check failed.
pub const ALERT_FAILURES: i32 = 1;

/// Failing checks with Warning severity were found, but no Alert
///
/// Used when `--exit-code` was requested and the worst failure is a
/// Warning.
pub const WARNING_FAILURES: i32 = 2;

/// Error - the audit could not run
///
/// Used when:
/// - The configuration file is invalid
/// - The rule catalog cannot be loaded or is missing a rule
/// - The inventory cannot be read
/// - The report cannot be written
pub const ERROR: i32 = 3;

/// Exit code for a completed audit
pub fn for_report(report: &Report, enforce: bool) -> i32 {
    if !enforce {
        return SUCCESS;
    }
    match report.worst_failure() {
        Some(Severity::Alert) => ALERT_FAILURES,
        Some(Severity::Warning) => WARNING_FAILURES,
        Some(Severity::Info) | None => SUCCESS,
    }
}
