//! Canonical dependency identifiers and sets
//!
//! A [`DependencySet`] is always sorted by name and free of duplicates. Every
//! constructor enforces that, so comparison and serialization can rely on it.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Where a dependency comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// A published artifact, usually `group:artifact:version`
    ExternalArtifact,
    /// A module inside the same repository, written as a path like `:lib:core`
    InternalModule,
}

impl DependencyKind {
    /// Infer the kind from a canonical name. Module paths start with `:`.
    pub fn infer(name: &str) -> Self {
        if name.starts_with(':') {
            DependencyKind::InternalModule
        } else {
            DependencyKind::ExternalArtifact
        }
    }
}

/// One dependency, identified by its canonical name
///
/// Equality, hashing and ordering only look at `name`; two identifiers with
/// the same coordinate are the same dependency whatever path reached them.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyId {
    name: String,
    kind: DependencyKind,
}

impl DependencyId {
    pub fn new(name: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// External artifact coordinate
    pub fn artifact(name: impl Into<String>) -> Self {
        Self::new(name, DependencyKind::ExternalArtifact)
    }

    /// In-repository module path
    pub fn module(name: impl Into<String>) -> Self {
        Self::new(name, DependencyKind::InternalModule)
    }

    /// Identifier for a name read back from a baseline file
    pub fn from_canonical(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = DependencyKind::infer(&name);
        Self { name, kind }
    }

    /// Why `name` cannot be stored as one baseline line, if it cannot
    pub fn name_problem(name: &str) -> Option<&'static str> {
        if name.is_empty() {
            Some("is empty")
        } else if name.contains(['\n', '\r']) {
            Some("contains a line break")
        } else {
            None
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }
}

impl PartialEq for DependencyId {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DependencyId {}

impl std::hash::Hash for DependencyId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for DependencyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sorted, duplicate-free sequence of dependency identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet {
    entries: Vec<DependencyId>,
}

/// Why a sequence of names is not in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalViolation {
    /// Line `index` sorts before the line preceding it
    OutOfOrder { index: usize, name: String },
    /// Line `index` repeats the line preceding it
    Duplicate { index: usize, name: String },
    /// Line `index` is empty
    Blank { index: usize },
}

impl fmt::Display for CanonicalViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reported 1-based to match editor line numbers
        match self {
            CanonicalViolation::OutOfOrder { index, name } => {
                write!(f, "line {} '{}' is out of sort order", index + 1, name)
            }
            CanonicalViolation::Duplicate { index, name } => {
                write!(f, "line {} '{}' is a duplicate", index + 1, name)
            }
            CanonicalViolation::Blank { index } => write!(f, "line {} is blank", index + 1),
        }
    }
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `entries` only if they are already canonical; nothing is
    /// reordered or dropped.
    pub fn try_from_canonical(entries: Vec<DependencyId>) -> Result<Self, CanonicalViolation> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(CanonicalViolation::Blank { index });
            }
            if index == 0 {
                continue;
            }
            match entries[index - 1].cmp(entry) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(CanonicalViolation::Duplicate {
                        index,
                        name: entry.name.clone(),
                    });
                }
                Ordering::Greater => {
                    return Err(CanonicalViolation::OutOfOrder {
                        index,
                        name: entry.name.clone(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyId> {
        self.entries.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .is_ok()
    }

    /// Canonical names in order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    /// Entries of `self` that are not in `other`, in canonical order
    pub fn difference(&self, other: &DependencySet) -> DependencySet {
        let mut result = Vec::new();
        let mut theirs = other.entries.iter().peekable();

        for entry in &self.entries {
            while theirs.next_if(|candidate| *candidate < entry).is_some() {}
            if theirs.peek().is_some_and(|candidate| *candidate == entry) {
                continue;
            }
            result.push(entry.clone());
        }

        DependencySet { entries: result }
    }

    /// Split into (matching, not matching) while keeping canonical order
    pub fn partition<F>(&self, mut predicate: F) -> (DependencySet, DependencySet)
    where
        F: FnMut(&DependencyId) -> bool,
    {
        let (yes, no): (Vec<_>, Vec<_>) =
            self.entries.iter().cloned().partition(|entry| predicate(entry));
        (DependencySet { entries: yes }, DependencySet { entries: no })
    }
}

impl FromIterator<DependencyId> for DependencySet {
    /// Sorts and collapses duplicates. The first kind seen for a name wins.
    fn from_iter<I: IntoIterator<Item = DependencyId>>(iter: I) -> Self {
        let mut entries: Vec<DependencyId> = iter.into_iter().collect();
        entries.sort();
        entries.dedup();
        Self { entries }
    }
}

impl IntoIterator for DependencySet {
    type Item = DependencyId;
    type IntoIter = std::vec::IntoIter<DependencyId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a DependencyId;
    type IntoIter = std::slice::Iter<'a, DependencyId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    include!("identifier.test.rs");
}
