//! Service name constants and validation

use colored::Colorize;

/// Valid service names for --only and --skip options
pub const VALID_SERVICES: &[&str] = &[
    "rds",
    "ecs",
    "elb",
    "s3",
    "ec2",
    "vpc",
    "ecr",
    "logs",
    "route53",
    "cloudfront",
    "wafv2",
    "observability",
];

/// Check if a service name is valid
pub fn is_valid_service(name: &str) -> bool {
    VALID_SERVICES.contains(&name)
}

/// Filter a list of services, returning only valid ones (lowercased) and
/// printing warnings for invalid ones
pub fn filter_valid_services(services: Vec<String>) -> Vec<String> {
    let mut valid = Vec::new();
    for service in services {
        let normalized = service.trim().to_lowercase();
        if is_valid_service(&normalized) {
            valid.push(normalized);
        } else {
            eprintln!(
                "{} Unknown service '{}' ignored. Valid services: {}",
                "Warning:".yellow(),
                service.cyan(),
                VALID_SERVICES.join(", ").dimmed()
            );
        }
    }
    valid
}
