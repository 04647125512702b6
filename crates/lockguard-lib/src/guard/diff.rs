//! Baseline diff classification
//!
//! [`compare`] is the pure set comparison. [`evaluate`] adds the store
//! side effects: which files a given outcome is allowed to touch.

use super::GuardError;
use super::baseline::{BaselineKey, BaselineStore};
use super::identifier::DependencySet;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Whether a run may update the committed baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Compare against the baseline; never overwrite it
    #[default]
    Enforce,
    /// Record the current set as the new baseline
    Baseline,
}

/// Result of diffing one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DiffOutcome {
    /// A baseline was written at `path`
    BaselineCreated { path: PathBuf },
    /// Current set equals the baseline
    NoDiff,
    /// `added` = current - baseline, `removed` = baseline - current
    HasDiff {
        added: DependencySet,
        removed: DependencySet,
    },
}

impl DiffOutcome {
    pub fn is_diff(&self) -> bool {
        matches!(self, DiffOutcome::HasDiff { .. })
    }
}

/// Compare two canonical sets. Only ever yields `NoDiff` or `HasDiff`.
pub fn compare(current: &DependencySet, baseline: &DependencySet) -> DiffOutcome {
    let added = current.difference(baseline);
    let removed = baseline.difference(current);

    if added.is_empty() && removed.is_empty() {
        DiffOutcome::NoDiff
    } else {
        DiffOutcome::HasDiff { added, removed }
    }
}

/// Classify `current` against `baseline` and persist what the outcome permits
///
/// - no baseline, or baseline mode: report and baseline are both written
/// - no difference: nothing is written
/// - difference: only the report is written; the baseline stays as it was
pub fn evaluate(
    store: &BaselineStore<'_>,
    key: &BaselineKey,
    current: &DependencySet,
    baseline: Option<&DependencySet>,
    mode: GuardMode,
) -> Result<DiffOutcome, GuardError> {
    let baseline = match (baseline, mode) {
        (Some(baseline), GuardMode::Enforce) => baseline,
        _ => {
            let path = store.save(key, current)?;
            info!(
                configuration = %key.configuration,
                count = current.len(),
                "Baseline written to {}",
                path.display()
            );
            return Ok(DiffOutcome::BaselineCreated { path });
        }
    };

    let outcome = compare(current, baseline);
    if let DiffOutcome::HasDiff { added, removed } = &outcome {
        let report = store.save_report(key, current)?;
        debug!(
            configuration = %key.configuration,
            added = added.len(),
            removed = removed.len(),
            "Dependency drift, current set written to {}",
            report.display()
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    include!("diff.test.rs");
}
