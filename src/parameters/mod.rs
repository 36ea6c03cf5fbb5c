//! Parameter group resolution
//!
//! Resolves a named parameter group to its effective `name -> value`
//! settings. Parameter groups are typically shared by many resources (every
//! member of a cluster, every database built from the same template), so each
//! group name is resolved at most once per run: the [`ParameterCache`] is owned
//! by the caller, lives for one run, and is never refreshed.
//!
//! Resolution is best-effort. A failed lookup yields an empty, *unavailable*
//! [`ParameterSet`] and a warning; evaluators treat unavailable parameters as
//! a reason to skip parameter-dependent checks rather than to fail or pass
//! them.
//!
//! The cache has no locking. Evaluation is sequential, and the resolver holds
//! the cache by `&mut`, so concurrent use cannot compile.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::inventory::{ParameterScope, ParameterSource};

/// Whether a parameter set reflects real data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Resolved,
    Unavailable { reason: String },
}

/// Effective parameter values of one parameter group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    group: String,
    values: BTreeMap<String, String>,
    availability: Availability,
}

impl ParameterSet {
    /// A resolved set with no parameters
    pub fn empty(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            values: BTreeMap::new(),
            availability: Availability::Resolved,
        }
    }

    pub fn from_pairs(
        group: impl Into<String>,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            group: group.into(),
            values: pairs.into_iter().collect(),
            availability: Availability::Resolved,
        }
    }

    /// An empty set standing in for a failed lookup
    pub fn unavailable(group: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            values: BTreeMap::new(),
            availability: Availability::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` is set to `1` or `ON` (any case)
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).map(is_truthy).unwrap_or(false)
    }

    pub fn is_available(&self) -> bool {
        self.availability == Availability::Resolved
    }

    /// Reason the lookup failed, if it did
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.availability {
            Availability::Resolved => None,
            Availability::Unavailable { reason } => Some(reason),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Engine parameter truthiness
pub fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("ON")
}

/// Run-scoped cache of resolved parameter groups, keyed by group name
#[derive(Debug, Default)]
pub struct ParameterCache {
    entries: HashMap<String, ParameterSet>,
    remote_lookups: usize,
}

impl ParameterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of remote lookups issued through this cache
    pub fn remote_lookups(&self) -> usize {
        self.remote_lookups
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves parameter groups through a [`ParameterSource`], caching results
pub struct ParameterResolver<'a> {
    source: &'a dyn ParameterSource,
    cache: &'a mut ParameterCache,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(source: &'a dyn ParameterSource, cache: &'a mut ParameterCache) -> Self {
        Self { source, cache }
    }

    /// Resolve `group_name`.
    ///
    /// An empty name resolves to an empty set without a remote call. Failed
    /// lookups are cached too, so a broken group shared by many resources is
    /// reported once.
    ///
    /// The cache is keyed by group name alone. Cluster and instance groups
    /// share one namespace, so the first scope a name is resolved with wins
    /// for the rest of the run.
    pub async fn resolve(&mut self, group_name: &str, scope: ParameterScope) -> ParameterSet {
        if group_name.is_empty() {
            return ParameterSet::empty(group_name);
        }

        if let Some(cached) = self.cache.entries.get(group_name) {
            debug!(group = group_name, "Parameter group cache hit");
            return cached.clone();
        }

        self.cache.remote_lookups += 1;
        let resolved = match self.source.describe_parameters(group_name, scope).await {
            Ok(pairs) => {
                debug!(
                    group = group_name,
                    scope = %scope,
                    parameters = pairs.len(),
                    "Parameter group resolved"
                );
                ParameterSet::from_pairs(group_name, pairs)
            }
            Err(e) => {
                warn!(
                    group = group_name,
                    scope = %scope,
                    error = %e,
                    "Failed to resolve parameter group; parameter checks will be skipped"
                );
                ParameterSet::unavailable(group_name, e.to_string())
            }
        };

        self.cache
            .entries
            .insert(group_name.to_string(), resolved.clone());
        resolved
    }
}
