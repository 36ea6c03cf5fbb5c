//! Sensitive configuration key detection
//!
//! Flags configuration keys (e.g., container environment variable names) whose
//! names suggest they hold a secret. Only names are inspected, never values,
//! and there is no notion of keys that merely reference a secret store, so
//! `API_KEY_ARN` is flagged just like `API_KEY`.

/// Keywords flagged when no configuration overrides them
pub const DEFAULT_SENSITIVE_KEYWORDS: &[&str] =
    &["PASSWORD", "TOKEN", "SECRET", "KEY", "CREDENTIAL"];

/// Case-insensitive substring matcher over a keyword list
#[derive(Debug, Clone)]
pub struct SensitiveKeyScanner {
    keywords: Vec<String>,
}

impl SensitiveKeyScanner {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether `key` contains any keyword
    pub fn is_sensitive(&self, key: &str) -> bool {
        let upper = key.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }

    /// Keys that match, in input order
    pub fn scan<'a, I>(&self, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().filter(|k| self.is_sensitive(k)).collect()
    }
}

impl Default for SensitiveKeyScanner {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_KEYWORDS)
    }
}
