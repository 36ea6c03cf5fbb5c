//! Terminal output formatting with colors

use colored::Colorize;

use super::table::{Cell, Table};
use super::{CatalogRenderer, ReportRenderer};
use crate::catalog::RuleCatalog;
use crate::error::OutputError;
use crate::rules::results::{EvaluationResult, Report, Severity};

const REPORT_HEADERS: [&str; 6] = ["SERVICE", "STATUS", "LEVEL", "RESOURCE", "SETTING", "ISSUE"];
const CATALOG_HEADERS: [&str; 4] = ["RULE", "SERVICE", "LEVEL", "ISSUE"];

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_account(&self, account_id: &str) -> String {
        format!(
            "{} {}\n\n",
            "Executing on AWS Account:".dimmed(),
            account_id.white().bold()
        )
    }

    fn format_row(&self, result: &EvaluationResult) -> Vec<Cell> {
        let level = if result.is_pass() {
            Cell::plain("-")
        } else {
            Cell::severity(result.severity)
        };

        vec![
            Cell::plain(&result.service),
            Cell::status(result.status),
            level,
            Cell::plain(&result.resource_id),
            Cell::plain(&result.observed),
            Cell::plain(&result.issue),
        ]
    }

    fn format_summary(&self, section: &str, report: &Report) -> String {
        let mut summary = format!(
            "{}: {} checks shown, {} passed, {} failed ({} {}, {} {}, {} {})",
            section.bold(),
            report.len(),
            report.count_passed(),
            report.count_failed(),
            report.count_failed_by_severity(Severity::Alert),
            "Alert".red(),
            report.count_failed_by_severity(Severity::Warning),
            "Warning".yellow(),
            report.count_failed_by_severity(Severity::Info),
            "Info".cyan(),
        );

        if !report.skipped().is_empty() {
            summary.push_str(&format!(
                ", {} {}",
                report.skipped().len(),
                "skipped".dimmed()
            ));
        }
        summary.push('\n');
        summary
    }

    fn format_no_issues(&self, section: &str) -> String {
        format!("{}: {}\n", section.bold(), "No issues found.".green())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_report(
        &self,
        section: &str,
        report: &Report,
        account_id: Option<&str>,
    ) -> Result<String, OutputError> {
        let mut output = String::new();

        if let Some(account_id) = account_id {
            output.push_str(&self.format_account(account_id));
        }

        if !report.is_empty() {
            let mut table = Table::new(&REPORT_HEADERS);
            for result in report.results() {
                table.add_row(self.format_row(result));
            }
            output.push_str(&table.render());
            output.push_str(&self.format_summary(section, report));
        }

        // Fail-only runs print nothing at all when every check passed
        if !report.fail_only() && report.count_failed() == 0 {
            output.push_str(&self.format_no_issues(section));
        }

        Ok(output)
    }
}

impl CatalogRenderer for TerminalOutput {
    fn render_catalog(&self, catalog: &RuleCatalog) -> Result<String, OutputError> {
        let mut table = Table::new(&CATALOG_HEADERS);
        for (id, rule) in catalog.iter() {
            table.add_row(vec![
                Cell::plain(id),
                Cell::plain(&rule.service),
                Cell::severity(rule.severity),
                Cell::plain(&rule.issue),
            ]);
        }

        let mut output = table.render();
        output.push_str(&format!("{} rules\n", catalog.len()));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::results::Status;

    fn plain() -> TerminalOutput {
        colored::control::set_override(false);
        TerminalOutput::new()
    }

    fn row(status: Status, severity: Severity) -> EvaluationResult {
        EvaluationResult::new(
            "s3-encryption",
            "S3",
            status,
            severity,
            "app-logs",
            if status == Status::Pass { "Enabled" } else { "Disabled" },
            "Default encryption is not configured",
        )
    }

    fn report(fail_only: bool, rows: Vec<EvaluationResult>) -> Report {
        let mut report = Report::new(fail_only);
        report.add_all(rows);
        report
    }

    #[test]
    fn test_fail_only_with_no_failures_renders_nothing() {
        let report = report(true, vec![row(Status::Pass, Severity::Alert)]);
        let output = plain().render_report("S3", &report, None).unwrap();
        assert_eq!(output, "");
    }

    #[test]
    fn test_all_passing_shows_table_and_notice() {
        let report = report(false, vec![row(Status::Pass, Severity::Alert)]);
        let output = plain().render_report("S3", &report, None).unwrap();

        assert!(output.contains("| SERVICE | STATUS | LEVEL |"));
        assert!(output.contains("| S3      | Pass   | -     |"));
        assert!(output.ends_with("S3: No issues found.\n"));
    }

    #[test]
    fn test_empty_report_shows_notice_only() {
        let output = plain()
            .render_report("Route53", &Report::new(false), None)
            .unwrap();
        assert_eq!(output, "Route53: No issues found.\n");
    }

    #[test]
    fn test_failures_suppress_notice() {
        let report = report(
            false,
            vec![
                row(Status::Pass, Severity::Alert),
                row(Status::Fail, Severity::Warning),
            ],
        );
        let output = plain().render_report("S3", &report, None).unwrap();

        assert!(output.contains("| S3      | Fail   | Warning |"));
        assert!(output.contains("S3: 2 checks shown, 1 passed, 1 failed (0 Alert, 1 Warning, 0 Info)"));
        assert!(!output.contains("No issues found."));
    }

    #[test]
    fn test_fail_only_shows_failing_rows() {
        let report = report(
            true,
            vec![
                row(Status::Pass, Severity::Alert),
                row(Status::Fail, Severity::Alert),
            ],
        );
        let output = plain().render_report("S3", &report, None).unwrap();

        assert!(output.contains("Fail"));
        assert!(!output.contains("| Pass"));
        assert!(output.contains("1 checks shown"));
    }

    #[test]
    fn test_account_header() {
        let output = plain()
            .render_report("All Services", &Report::new(false), Some("123456789012"))
            .unwrap();
        assert!(output.starts_with("Executing on AWS Account: 123456789012\n"));
    }

    #[test]
    fn test_summary_counts_skipped() {
        let mut report = report(false, vec![row(Status::Fail, Severity::Alert)]);
        report.add_skipped(vec![crate::rules::results::SkippedCheck {
            rule_id: "rds-general-log".to_string(),
            resource_id: "db-1".to_string(),
            reason: "parameter group unavailable".to_string(),
        }]);

        let output = plain().render_report("RDS", &report, None).unwrap();
        assert!(output.contains(", 1 skipped"));
    }

    #[test]
    fn test_catalog_listing() {
        let catalog = RuleCatalog::builtin().unwrap();
        let output = plain().render_catalog(&catalog).unwrap();

        assert!(output.contains("| RULE"));
        assert!(output.contains("rds-general-log"));
        assert!(output.ends_with(&format!("{} rules\n", catalog.len())));
    }
}
