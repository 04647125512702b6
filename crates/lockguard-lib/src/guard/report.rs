//! Report writer and human-facing messages

use super::GuardError;
use super::baseline::{BaselineKey, BaselineStore};
use super::diff::{self, DiffOutcome, GuardMode};
use super::identifier::DependencySet;
use super::policy::{self, AllowPolicy};
use crate::display::StyleManager;
use std::path::Path;

/// Everything known about one (project, configuration) for a single run
pub struct ReportData<'p> {
    pub key: BaselineKey,
    pub policy: &'p dyn AllowPolicy,
    pub current: DependencySet,
    /// Committed baseline, if one was loaded
    pub baseline: Option<DependencySet>,
}

impl ReportData<'_> {
    pub fn project_path(&self) -> &str {
        &self.key.project_path
    }

    pub fn configuration(&self) -> &str {
        &self.key.configuration
    }

    /// Subset of the current set rejected by the policy
    pub fn disallowed(&self) -> DependencySet {
        policy::filter(&self.current, self.policy).disallowed
    }
}

/// Drives the store and diff engine for one project directory
pub struct ReportWriter<'a> {
    store: BaselineStore<'a>,
    mode: GuardMode,
}

impl<'a> ReportWriter<'a> {
    pub fn new(store: BaselineStore<'a>, mode: GuardMode) -> Self {
        Self { store, mode }
    }

    /// Assemble report data, loading the committed baseline
    ///
    /// Baseline mode never reads the old file, so an unreadable baseline can
    /// always be replaced.
    pub fn prepare<'p>(
        &self,
        key: BaselineKey,
        policy: &'p dyn AllowPolicy,
        current: DependencySet,
    ) -> Result<ReportData<'p>, GuardError> {
        let baseline = match self.mode {
            GuardMode::Enforce => self.store.load(&key)?,
            GuardMode::Baseline => None,
        };
        Ok(ReportData {
            key,
            policy,
            current,
            baseline,
        })
    }

    /// Diff and persist according to the outcome
    pub fn write(&self, data: &ReportData<'_>) -> Result<DiffOutcome, GuardError> {
        diff::evaluate(
            &self.store,
            &data.key,
            &data.current,
            data.baseline.as_ref(),
            self.mode,
        )
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Structured diff report, rendered styled for the terminal or plain for
/// failure output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffMessage {
    pub project_path: String,
    pub configuration: String,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl DiffMessage {
    pub fn new(key: &BaselineKey, added: &DependencySet, removed: &DependencySet) -> Self {
        let names = |set: &DependencySet| -> Vec<String> {
            set.iter().map(|dependency| dependency.name().to_string()).collect()
        };
        Self {
            project_path: key.project_path.clone(),
            configuration: key.configuration.clone(),
            removed: names(removed),
            added: names(added),
        }
    }

    /// Build from a diff outcome; `None` unless the outcome is a diff
    pub fn from_outcome(key: &BaselineKey, outcome: &DiffOutcome) -> Option<Self> {
        match outcome {
            DiffOutcome::HasDiff { added, removed } => Some(Self::new(key, added, removed)),
            _ => None,
        }
    }

    pub fn render(&self, styling: &StyleManager) -> String {
        let mut lines = vec![styling.style_emphasis(&format!(
            "Dependencies changed in {} for configuration \"{}\"",
            self.project_path, self.configuration
        ))];
        lines.extend(
            self.removed
                .iter()
                .map(|name| styling.style_error(&format!("- {}", name))),
        );
        lines.extend(
            self.added
                .iter()
                .map(|name| styling.style_success(&format!("+ {}", name))),
        );
        lines.push(String::new());
        lines.push(rebaseline_instructions(&self.project_path, &self.configuration));
        lines.join("\n")
    }

    pub fn plain(&self) -> String {
        self.render(&StyleManager::plain())
    }
}

pub fn no_diff_message(project_path: &str, configuration: &str) -> String {
    format!(
        "No dependency changes found in {} for configuration \"{}\"",
        project_path, configuration
    )
}

pub fn baseline_created_message(project_path: &str, configuration: &str, path: &Path) -> String {
    format!(
        "Dependency baseline created in {} for configuration \"{}\"\nFile: file://{}",
        project_path,
        configuration,
        path.display()
    )
}

/// Points at the per-configuration and project-wide re-baseline commands
pub fn rebaseline_instructions(project_path: &str, configuration: &str) -> String {
    format!(
        "If this is intentional, re-baseline using `lockguard baseline {configuration}` in {project_path}\n\
         Or use `lockguard baseline` to re-baseline every configuration in {project_path}"
    )
}

#[cfg(test)]
mod tests {
    include!("report.test.rs");
}
