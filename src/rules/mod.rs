//! Rules module - Rule categories, evaluators and the evaluation engine

pub mod categories;
pub mod constants;
pub mod engine;
pub mod evaluator;
pub mod maintenance;
pub mod patterns;
pub mod results;

pub use results::{EvaluationResult, Report, Severity, SkippedCheck, Status};
