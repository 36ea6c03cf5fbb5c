//! Audit commands - Evaluate an inventory and print the compliance report

use colored::Colorize;
use std::path::Path;
use tracing::debug;

use super::{load_catalog, AuditArgs, OutputFormat};
use crate::cli::exit_codes;
use crate::cli::output::{JsonOutput, ReportRenderer, TerminalOutput};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::{CloudReviewError, OutputError};
use crate::inventory::FileInventory;
use crate::rules::constants::filter_valid_services;
use crate::rules::engine::RulesEngine;

/// Which services an audit evaluates, and the heading of its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    section: &'static str,
    only: Option<Vec<String>>,
    skip: Option<Vec<String>>,
}

impl Selection {
    /// Every service, optionally filtered by `--only` / `--skip`
    pub fn all(only: Option<Vec<String>>, skip: Option<Vec<String>>) -> Self {
        Self {
            section: "All Services",
            only,
            skip,
        }
    }

    /// A single service, by its category name
    pub fn service(name: &'static str) -> Self {
        Self {
            section: section_name(name),
            only: Some(vec![name.to_string()]),
            skip: None,
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Unknown names are warned about and dropped; an `--only` list left
    /// empty by that is an error
    fn apply(&self, engine: &mut RulesEngine) -> Result<(), CloudReviewError> {
        if let Some(only) = &self.only {
            let valid = filter_valid_services(only.clone());
            if valid.is_empty() {
                return Err(CloudReviewError::NoServicesSelected {
                    requested: only.join(","),
                });
            }
            engine.set_only_categories(valid);
        }
        if let Some(skip) = &self.skip {
            engine.set_skip_categories(filter_valid_services(skip.clone()));
        }
        Ok(())
    }
}

/// Report heading for a category name
fn section_name(service: &str) -> &'static str {
    match service {
        "rds" => "RDS",
        "ecs" => "ECS",
        "elb" => "ELB",
        "s3" => "S3",
        "ec2" => "EC2",
        "vpc" => "VPC",
        "ecr" => "ECR",
        "logs" => "CloudWatchLogs",
        "route53" => "Route53",
        "cloudfront" => "CloudFront",
        "wafv2" => "WAFv2",
        "observability" => "Observability",
        _ => "All Services",
    }
}

pub async fn execute(
    global: &GlobalOptions,
    selection: Selection,
    args: &AuditArgs,
) -> Result<i32, CloudReviewError> {
    // Load configuration and rules
    let config = Config::load(global.config.as_deref())?;
    let catalog = load_catalog(global.rules.as_deref(), &config)?;
    let fail_only = global.fail_only || config.fail_only;

    // Load the inventory
    let source = FileInventory::load(&args.inventory).await?;

    // Run the rules engine
    let mut engine = RulesEngine::new(catalog, config);
    engine.set_fail_only(fail_only);
    selection.apply(&mut engine)?;

    let report = engine.run(source.inventory(), &source).await?;
    debug!(
        section = selection.section(),
        rows = report.len(),
        skipped = report.skipped().len(),
        "Rendering report"
    );

    let renderer: Box<dyn ReportRenderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
    };
    let rendered = renderer.render_report(
        selection.section(),
        &report,
        source.inventory().account_id.as_deref(),
    )?;

    write_output(&rendered, args.output.as_deref())?;

    Ok(exit_codes::for_report(&report, args.exit_code))
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<(), OutputError> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| OutputError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })?;
            eprintln!(
                "{} Report written to: {}",
                "Success:".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
