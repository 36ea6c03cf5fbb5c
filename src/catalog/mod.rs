//! # Rule Catalog
//!
//! Lookup table from rule identifier to rule metadata (owning service,
//! severity, issue text). The catalog is loaded once at startup and is
//! read-only afterwards.
//!
//! A built-in catalog is embedded in the binary; a YAML file with the same
//! shape can replace it:
//!
//! ```yaml
//! rules:
//!   s3-encryption:
//!     service: S3
//!     level: Alert
//!     issue: Default encryption is not configured
//! ```
//!
//! Loading failures and lookups of undefined rule ids are fatal: the
//! evaluators and the catalog must stay in lockstep, and a report built on a
//! partial catalog would be misleading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::CatalogError;
use crate::rules::results::Severity;

/// Rule definitions shipped with the binary
pub const BUILTIN_RULES: &str = include_str!("rules.yaml");

const BUILTIN_SOURCE_NAME: &str = "<built-in>";

/// Metadata for a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Service owning the rule (e.g., "RDS")
    pub service: String,

    /// Severity reported when the rule fails
    #[serde(alias = "level")]
    pub severity: Severity,

    /// Human-readable issue description
    pub issue: String,
}

#[derive(Debug, Deserialize)]
struct RuleSource {
    rules: BTreeMap<String, Rule>,
}

/// Immutable identifier -> [`Rule`] mapping
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: BTreeMap<String, Rule>,
}

impl RuleCatalog {
    /// Load the built-in catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_RULES, BUILTIN_SOURCE_NAME)
    }

    /// Load a catalog from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Load from an explicit file when given, otherwise the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::builtin(),
        }
    }

    /// Parse a catalog from YAML text; `source_name` is used in error messages
    pub fn from_yaml(content: &str, source_name: &str) -> Result<Self, CatalogError> {
        let source: RuleSource =
            serde_yaml::from_str(content).map_err(|e| CatalogError::Parse {
                path: source_name.to_string(),
                source: e,
            })?;

        if source.rules.is_empty() {
            return Err(CatalogError::Empty {
                path: source_name.to_string(),
            });
        }

        debug!(
            source = source_name,
            rules = source.rules.len(),
            "Rule catalog loaded"
        );

        Ok(Self {
            rules: source.rules,
        })
    }

    /// Get the rule for `id`.
    ///
    /// An unknown id is a programming error in the calling evaluator, so the
    /// error carries the category that asked for it.
    pub fn get(&self, id: &str, category: &str) -> Result<&Rule, CatalogError> {
        self.rules.get(id).ok_or_else(|| CatalogError::UnknownRule {
            rule_id: id.to_string(),
            category: category.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Verify that every id in `ids` is defined
    pub fn ensure_defined(&self, ids: &[&str], category: &str) -> Result<(), CatalogError> {
        for id in ids {
            self.get(id, category)?;
        }
        Ok(())
    }

    /// Iterate over rules in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(id, rule)| (id.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        let rule = catalog.get("s3-encryption", "s3").unwrap();
        assert_eq!(rule.service, "S3");
        assert_eq!(rule.severity, Severity::Alert);
    }

    #[test]
    fn test_get_unknown_rule_is_error() {
        let catalog = RuleCatalog::builtin().unwrap();
        let err = catalog.get("does-not-exist", "rds").unwrap_err();

        match err {
            CatalogError::UnknownRule { rule_id, category } => {
                assert_eq!(rule_id, "does-not-exist");
                assert_eq!(category, "rds");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_yaml_accepts_level_and_severity_keys() {
        let yaml = r#"
rules:
  a:
    service: S3
    level: warning
    issue: first
  b:
    service: EC2
    severity: Alert
    issue: second
"#;
        let catalog = RuleCatalog::from_yaml(yaml, "test").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a", "t").unwrap().severity, Severity::Warning);
        assert_eq!(catalog.get("b", "t").unwrap().severity, Severity::Alert);
    }

    #[test]
    fn test_from_yaml_rejects_malformed() {
        let err = RuleCatalog::from_yaml("rules: [not, a, map]", "bad.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_severity() {
        let yaml = "rules:\n  a:\n    service: S3\n    level: Fatal\n    issue: x\n";
        assert!(matches!(
            RuleCatalog::from_yaml(yaml, "t"),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_yaml_rejects_empty() {
        let err = RuleCatalog::from_yaml("rules: {}", "empty.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Empty { .. }));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = RuleCatalog::load_from_file(Path::new("/nonexistent/rules.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::FileRead { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "rules:\n  custom-rule:\n    service: S3\n    level: Info\n    issue: custom"
        )
        .unwrap();

        let catalog = RuleCatalog::load(Some(file.path())).unwrap();
        assert!(catalog.contains("custom-rule"));
        assert!(!catalog.contains("s3-encryption"));
    }

    #[test]
    fn test_ensure_defined() {
        let catalog = RuleCatalog::builtin().unwrap();
        assert!(catalog
            .ensure_defined(&["s3-encryption", "s3-lifecycle"], "s3")
            .is_ok());
        assert!(catalog
            .ensure_defined(&["s3-encryption", "s3-missing"], "s3")
            .is_err());
    }
}
