//! cloudreview Library
//!
//! This crate provides the core functionality for auditing cloud resource
//! configurations against a catalog of best-practice rules: parameter
//! resolution, rule evaluation, and report rendering.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod parameters;
pub mod rules;

pub use error::CloudReviewError;
