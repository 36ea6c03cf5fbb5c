//! Rule categories

pub mod cloudfront;
pub mod ec2;
pub mod ecr;
pub mod ecs;
pub mod elb;
pub mod logs;
pub mod observability;
pub mod rds;
pub mod route53;
pub mod s3;
pub mod vpc;
pub mod wafv2;

use super::engine::RuleCategory;

/// Every category, in evaluation order
pub fn all() -> Vec<Box<dyn RuleCategory>> {
    vec![
        Box::new(rds::RdsRules),
        Box::new(ecs::EcsRules),
        Box::new(elb::ElbRules),
        Box::new(s3::S3Rules),
        Box::new(ec2::Ec2Rules),
        Box::new(vpc::VpcRules),
        Box::new(ecr::EcrRules),
        Box::new(logs::LogsRules),
        Box::new(route53::Route53Rules),
        Box::new(cloudfront::CloudFrontRules),
        Box::new(wafv2::Wafv2Rules),
        Box::new(observability::ObservabilityRules),
    ]
}
