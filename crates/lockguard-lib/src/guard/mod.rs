//! Dependency guard core
//!
//! Resolution-to-baseline pipeline: a resolved graph is walked into a
//! canonical [`DependencySet`], checked against an allow policy, diffed
//! against the committed baseline and reported.
//!
//! - [`identifier`] - canonical identifiers and sets
//! - [`graph`] - resolved graphs, traversal and graph providers
//! - [`policy`] - allow policies and baseline maps
//! - [`baseline`] - snapshot files
//! - [`diff`] - outcome classification
//! - [`report`] - report writer and rendered messages
//! - [`manifest`] - `lockguard.toml` project manifest
//! - [`pipeline`] - per-project orchestration with failure aggregation

pub mod baseline;
pub mod diff;
pub mod graph;
pub mod identifier;
pub mod manifest;
pub mod pipeline;
pub mod policy;
pub mod report;

pub use baseline::{BaselineKey, BaselineStore};
pub use diff::{DiffOutcome, GuardMode};
pub use graph::{ExportGraphProvider, GraphError, GraphProvider, ResolvedGraph};
pub use identifier::{DependencyId, DependencyKind, DependencySet};
pub use manifest::{GuardManifest, MANIFEST_FILE};
pub use pipeline::{ConfigurationReport, GuardRequest, GuardSummary, MonitoredConfiguration, ProjectInfo};
pub use policy::{AllowAll, AllowPolicy, BaselineMap, NamePattern, PatternPolicy};
pub use report::{DiffMessage, ReportData, ReportWriter};

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the guard pipeline
#[derive(Debug, Error)]
pub enum GuardError {
    #[error(
        "Configuration \"{configuration}\" was not found in {project_path}. Available configurations: {}",
        list_or_none(available)
    )]
    ConfigurationNotFound {
        project_path: String,
        configuration: String,
        available: Vec<String>,
    },

    #[error(
        "Disallowed dependencies found in {project_path} for configuration \"{configuration}\":\n{}",
        bullets(disallowed)
    )]
    DisallowedDependency {
        project_path: String,
        configuration: String,
        disallowed: Vec<String>,
    },

    /// Carries the complete plain-text diff report for one configuration
    #[error("{message}")]
    UnexpectedDiff {
        configuration: String,
        message: String,
    },

    #[error("Corrupt baseline {path}: {reason}")]
    CorruptBaseline { path: PathBuf, reason: String },

    #[error("Failed to write baseline {path}: {source}")]
    BaselineWriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read resolved graph {path}: {source}")]
    GraphReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse resolved graph {path}: {source}")]
    GraphParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid resolved graph for configuration \"{configuration}\": {source}")]
    InvalidGraph {
        configuration: String,
        source: GraphError,
    },

    #[error("Failed to read manifest {path}: {source}")]
    ManifestReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    #[error("{}", failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n"))]
    Aggregated { failures: Vec<GuardError> },
}

impl GuardError {
    /// Collapse a list of failures into one error; a single failure is
    /// returned as-is. Returns `None` for an empty list.
    pub fn aggregate(mut failures: Vec<GuardError>) -> Option<GuardError> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            _ => Some(GuardError::Aggregated { failures }),
        }
    }

    /// Failures contained in this error, flattening aggregates
    pub fn failures(&self) -> Vec<&GuardError> {
        match self {
            GuardError::Aggregated { failures } => {
                failures.iter().flat_map(GuardError::failures).collect()
            }
            other => vec![other],
        }
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
