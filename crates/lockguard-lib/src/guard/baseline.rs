//! Baseline snapshot persistence
//!
//! Each (project, configuration) owns two files with identical content rules:
//! the persisted baseline under `dependencies/`, meant to be committed, and
//! the ephemeral report under `build/reports/lockguard/`, rewritten per run.

use super::GuardError;
use super::identifier::{DependencyId, DependencySet};
use crate::application::session::FileSystemProvider;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Directory (relative to the project) holding committed baselines
pub const BASELINE_DIR: &str = "dependencies";

/// Directory (relative to the project) holding per-run reports
pub const REPORT_DIR: &str = "build/reports/lockguard";

const FILE_EXTENSION: &str = "txt";

/// Identifies one snapshot owner
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaselineKey {
    pub project_path: String,
    pub configuration: String,
}

impl BaselineKey {
    pub fn new(project_path: impl Into<String>, configuration: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            configuration: configuration.into(),
        }
    }

    fn file_name(&self) -> String {
        format!("{}.{}", self.configuration, FILE_EXTENSION)
    }
}

/// Render a set in the on-disk format: one name per line, trailing newline
pub fn serialize(dependencies: &DependencySet) -> String {
    let mut out = String::new();
    for dependency in dependencies {
        out.push_str(dependency.name());
        out.push('\n');
    }
    out
}

/// Parse on-disk content verbatim, rejecting anything non-canonical
///
/// Non-empty content must end with a newline and use `\n` line endings only.
pub fn parse(content: &str, path: &Path) -> Result<DependencySet, GuardError> {
    let corrupt = |reason: &str| GuardError::CorruptBaseline {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    if content.contains('\r') {
        return Err(corrupt("contains carriage returns"));
    }
    if !content.is_empty() && !content.ends_with('\n') {
        return Err(corrupt("missing trailing newline"));
    }

    let entries: Vec<DependencyId> = content.lines().map(DependencyId::from_canonical).collect();

    DependencySet::try_from_canonical(entries).map_err(|violation| corrupt(&violation.to_string()))
}

/// Reads and writes snapshots for one project directory
pub struct BaselineStore<'a> {
    fs: &'a dyn FileSystemProvider,
    project_dir: PathBuf,
}

impl<'a> BaselineStore<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            project_dir: project_dir.into(),
        }
    }

    /// Location of the committed baseline
    pub fn baseline_path(&self, key: &BaselineKey) -> PathBuf {
        self.project_dir.join(BASELINE_DIR).join(key.file_name())
    }

    /// Location of the per-run report
    pub fn report_path(&self, key: &BaselineKey) -> PathBuf {
        self.project_dir.join(REPORT_DIR).join(key.file_name())
    }

    /// Load the committed baseline, `None` when it has never been written
    pub fn load(&self, key: &BaselineKey) -> Result<Option<DependencySet>, GuardError> {
        let path = self.baseline_path(key);
        if !self.fs.exists(&path) {
            debug!("No baseline at {}", path.display());
            return Ok(None);
        }

        let content =
            self.fs
                .read_to_string(&path)
                .map_err(|source| GuardError::CorruptBaseline {
                    path: path.clone(),
                    reason: source.to_string(),
                })?;

        let dependencies = parse(&content, &path)?;
        trace!(
            count = dependencies.len(),
            "Loaded baseline {}",
            path.display()
        );
        Ok(Some(dependencies))
    }

    /// Write the set to both the report and the committed baseline
    pub fn save(&self, key: &BaselineKey, dependencies: &DependencySet) -> Result<PathBuf, GuardError> {
        self.save_report(key, dependencies)?;
        let path = self.baseline_path(key);
        self.write(&path, dependencies)?;
        Ok(path)
    }

    /// Write the set to the per-run report only
    pub fn save_report(
        &self,
        key: &BaselineKey,
        dependencies: &DependencySet,
    ) -> Result<PathBuf, GuardError> {
        let path = self.report_path(key);
        self.write(&path, dependencies)?;
        Ok(path)
    }

    fn write(&self, path: &Path, dependencies: &DependencySet) -> Result<(), GuardError> {
        trace!(count = dependencies.len(), "Writing {}", path.display());
        self.fs
            .write_atomic(path, &serialize(dependencies))
            .map_err(|source| GuardError::BaselineWriteFailure {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    include!("baseline.test.rs");
}
