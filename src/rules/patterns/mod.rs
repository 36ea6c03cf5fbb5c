//! Heuristic detection patterns

pub mod sensitive;

pub use sensitive::{SensitiveKeyScanner, DEFAULT_SENSITIVE_KEYWORDS};
