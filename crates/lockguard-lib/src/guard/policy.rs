//! Allow policies and baseline mapping
//!
//! A policy is a pure predicate over one identifier. Filtering a set with it
//! always yields two disjoint halves that together equal the input.

use super::identifier::{DependencyId, DependencyKind, DependencySet};

/// Decides whether a single dependency is permitted
pub trait AllowPolicy {
    fn is_allowed(&self, dependency: &DependencyId) -> bool;
}

impl<F> AllowPolicy for F
where
    F: Fn(&DependencyId) -> bool,
{
    fn is_allowed(&self, dependency: &DependencyId) -> bool {
        self(dependency)
    }
}

/// Policy that permits everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AllowPolicy for AllowAll {
    fn is_allowed(&self, _dependency: &DependencyId) -> bool {
        true
    }
}

/// Result of running a set through a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVerdict {
    pub allowed: DependencySet,
    pub disallowed: DependencySet,
}

impl PolicyVerdict {
    pub fn is_clean(&self) -> bool {
        self.disallowed.is_empty()
    }
}

/// Split `dependencies` into allowed and disallowed subsets
pub fn filter(dependencies: &DependencySet, policy: &dyn AllowPolicy) -> PolicyVerdict {
    let (allowed, disallowed) = dependencies.partition(|dependency| policy.is_allowed(dependency));
    PolicyVerdict {
        allowed,
        disallowed,
    }
}

// ============================================================================
// PATTERN POLICY
// ============================================================================

/// Name pattern where `*` matches any run of characters (including none)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    raw: String,
}

impl NamePattern {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, name: &str) -> bool {
        let mut segments = self.raw.split('*');
        // split always yields at least one segment
        let first = segments.next().unwrap_or_default();
        let Some(mut rest) = name.strip_prefix(first) else {
            return false;
        };

        let remaining: Vec<&str> = segments.collect();
        let Some((last, middle)) = remaining.split_last() else {
            // No '*' at all: exact match
            return rest.is_empty();
        };

        for segment in middle {
            match rest.find(segment) {
                Some(pos) => rest = &rest[pos + segment.len()..],
                None => return false,
            }
        }

        rest.ends_with(last)
    }
}

/// Declarative allow policy built from deny and allow patterns
///
/// A dependency is disallowed when it matches any deny pattern, or when an
/// allow list is present and it matches none of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternPolicy {
    deny: Vec<NamePattern>,
    allow: Vec<NamePattern>,
}

impl PatternPolicy {
    pub fn new(deny: Vec<NamePattern>, allow: Vec<NamePattern>) -> Self {
        Self { deny, allow }
    }

    pub fn deny(patterns: &[&str]) -> Self {
        Self::new(patterns.iter().map(|p| NamePattern::new(*p)).collect(), Vec::new())
    }
}

impl AllowPolicy for PatternPolicy {
    fn is_allowed(&self, dependency: &DependencyId) -> bool {
        let name = dependency.name();
        if self.deny.iter().any(|pattern| pattern.matches(name)) {
            return false;
        }
        self.allow.is_empty() || self.allow.iter().any(|pattern| pattern.matches(name))
    }
}

// ============================================================================
// BASELINE MAP
// ============================================================================

/// Rewrites a traversed set before it is checked and diffed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineMap {
    /// Include external artifacts
    pub artifacts: bool,
    /// Include in-repository modules
    pub modules: bool,
    /// Names dropped entirely
    pub exclude: Vec<NamePattern>,
    /// Turn `group:artifact:version` into `group:artifact`
    pub strip_versions: bool,
}

impl BaselineMap {
    /// Keep every dependency unchanged
    pub fn identity() -> Self {
        Self {
            artifacts: true,
            modules: true,
            exclude: Vec::new(),
            strip_versions: false,
        }
    }

    /// Apply the map and re-canonicalize
    pub fn apply(&self, dependencies: DependencySet) -> DependencySet {
        dependencies
            .into_iter()
            .filter(|dependency| match dependency.kind() {
                DependencyKind::ExternalArtifact => self.artifacts,
                DependencyKind::InternalModule => self.modules,
            })
            .filter(|dependency| {
                !self
                    .exclude
                    .iter()
                    .any(|pattern| pattern.matches(dependency.name()))
            })
            .map(|dependency| self.rename(dependency))
            .collect()
    }

    fn rename(&self, dependency: DependencyId) -> DependencyId {
        if !self.strip_versions || dependency.kind() != DependencyKind::ExternalArtifact {
            return dependency;
        }
        match dependency.name().rsplit_once(':') {
            Some((coordinate, _version)) if coordinate.contains(':') => {
                DependencyId::artifact(coordinate)
            }
            _ => dependency,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("policy.test.rs");
}
