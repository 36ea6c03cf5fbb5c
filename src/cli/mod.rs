//! # CLI Module
//!
//! This module defines the command-line interface for cloudreview using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `all` | Evaluate every service |
//! | `rds` | Evaluate RDS clusters and instances |
//! | `ecs` | Evaluate ECS clusters, services and task definitions |
//! | `elb` | Evaluate application load balancers and target groups |
//! | `s3` | Evaluate S3 buckets |
//! | `ec2` | Evaluate EBS encryption, volumes and snapshots |
//! | `vpc` | Evaluate VPCs and flow logs |
//! | `ecr` | Evaluate ECR repositories |
//! | `logs` | Evaluate CloudWatch log group retention |
//! | `route53` | Evaluate hosted zone query logging |
//! | `cloudfront` | Evaluate CloudFront distribution logging |
//! | `wafv2` | Evaluate web ACL logging |
//! | `observability` | Evaluate account telemetry settings |
//! | `rules` | List the loaded rule catalog |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Report output formatters (JSON, Terminal)
//!
//! ## Global Options
//!
//! All commands support these global options:
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `--rules <FILE>` - Rule catalog replacing the built-in one
//! - `-f, --fail-only` - Only show failing checks
//! - `--no-color` - Disable colored output
//!
//! ## Examples
//!
//! ```bash
//! # Audit everything in an inventory
//! cloudreview all -i inventory.json
//!
//! # Only failing RDS checks, as JSON
//! cloudreview --fail-only rds -i inventory.json --format json -o rds.json
//!
//! # Gate a pipeline on Alert and Warning failures
//! cloudreview all -i inventory.json --skip observability --exit-code
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::audit::Selection;
use commands::{AllArgs, AuditArgs, RulesArgs};

/// cloudreview - Audit AWS resource configurations against best-practice rules
#[derive(Parser, Debug)]
#[command(name = "cloudreview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted before or after any subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rule catalog file replacing the built-in catalog
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Only show failing checks
    #[arg(short, long, global = true)]
    pub fail_only: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate every service
    All(AllArgs),

    /// Evaluate RDS clusters and instances
    Rds(AuditArgs),

    /// Evaluate ECS clusters, services and task definitions
    Ecs(AuditArgs),

    /// Evaluate application load balancers and their target groups
    Elb(AuditArgs),

    /// Evaluate S3 buckets
    S3(AuditArgs),

    /// Evaluate EBS default encryption, volumes and snapshots
    Ec2(AuditArgs),

    /// Evaluate VPCs and their flow logs
    Vpc(AuditArgs),

    /// Evaluate ECR repositories
    Ecr(AuditArgs),

    /// Evaluate CloudWatch log group retention
    Logs(AuditArgs),

    /// Evaluate Route53 hosted zone query logging
    Route53(AuditArgs),

    /// Evaluate CloudFront distribution logging
    Cloudfront(AuditArgs),

    /// Evaluate WAFv2 web ACL logging
    Wafv2(AuditArgs),

    /// Evaluate account-level telemetry settings
    Observability(AuditArgs),

    /// List the loaded rule catalog
    Rules(RulesArgs),
}

/// What a parsed command asks for
#[derive(Debug)]
pub enum Invocation<'a> {
    Audit(Selection, &'a AuditArgs),
    Rules(&'a RulesArgs),
}

impl Commands {
    pub fn invocation(&self) -> Invocation<'_> {
        let (service, args) = match self {
            Commands::All(all) => {
                let selection = Selection::all(all.only.clone(), all.skip.clone());
                return Invocation::Audit(selection, &all.audit);
            }
            Commands::Rules(args) => return Invocation::Rules(args),
            Commands::Rds(args) => ("rds", args),
            Commands::Ecs(args) => ("ecs", args),
            Commands::Elb(args) => ("elb", args),
            Commands::S3(args) => ("s3", args),
            Commands::Ec2(args) => ("ec2", args),
            Commands::Vpc(args) => ("vpc", args),
            Commands::Ecr(args) => ("ecr", args),
            Commands::Logs(args) => ("logs", args),
            Commands::Route53(args) => ("route53", args),
            Commands::Cloudfront(args) => ("cloudfront", args),
            Commands::Wafv2(args) => ("wafv2", args),
            Commands::Observability(args) => ("observability", args),
        };
        Invocation::Audit(Selection::service(service), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "cloudreview", "s3", "-i", "inv.json", "--fail-only", "-vv", "--rules", "r.yaml",
        ]);
        assert!(cli.global.fail_only);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.rules, Some(PathBuf::from("r.yaml")));

        let Invocation::Audit(selection, args) = cli.command.invocation() else {
            panic!("expected an audit");
        };
        assert_eq!(selection.section(), "S3");
        assert_eq!(args.inventory, PathBuf::from("inv.json"));
    }

    #[test]
    fn test_all_accepts_comma_separated_filters() {
        let cli = Cli::parse_from([
            "cloudreview", "all", "-i", "inv.json", "--only", "rds,s3", "--exit-code",
        ]);
        let Commands::All(all) = &cli.command else {
            panic!("expected all command");
        };
        assert_eq!(all.only, Some(vec!["rds".to_string(), "s3".to_string()]));
        assert!(all.audit.exit_code);
    }

    #[test]
    fn test_only_is_not_accepted_by_service_commands() {
        let result = Cli::try_parse_from(["cloudreview", "rds", "-i", "inv.json", "--only", "s3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rules_is_not_an_audit() {
        let cli = Cli::parse_from(["cloudreview", "rules", "--format", "json"]);
        assert!(matches!(cli.command.invocation(), Invocation::Rules(_)));
    }
}
