//! Per-project guard pipeline
//!
//! Runs every monitored configuration of one project through
//! traverse → map → policy → diff, in declaration order. Three phases, each
//! collecting failures across all configurations before deciding:
//!
//! 1. name validation against the available configurations (no resolution yet)
//! 2. resolution and policy check (no files touched yet)
//! 3. baseline diff and persistence

use super::GuardError;
use super::baseline::{BaselineKey, BaselineStore};
use super::diff::{DiffOutcome, GuardMode};
use super::graph::{GraphError, GraphProvider};
use super::identifier::{DependencyId, DependencySet};
use super::policy::{self, AllowAll, AllowPolicy, BaselineMap};
use super::report::{DiffMessage, ReportWriter};
use crate::application::session::FileSystemProvider;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Conventional build-script configuration used by root projects when the
/// requested configuration does not exist
pub const ROOT_FALLBACK_CONFIGURATION: &str = "classpath";

/// A configuration under guard, with its policy and baseline map
pub struct MonitoredConfiguration {
    pub name: String,
    pub policy: Box<dyn AllowPolicy>,
    pub map: BaselineMap,
}

impl MonitoredConfiguration {
    /// Allow everything, keep every dependency unchanged
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: Box::new(AllowAll),
            map: BaselineMap::identity(),
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn AllowPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_map(mut self, map: BaselineMap) -> Self {
        self.map = map;
        self
    }
}

impl fmt::Debug for MonitoredConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoredConfiguration")
            .field("name", &self.name)
            .field("map", &self.map)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Project path used in messages, e.g. `:app`
    pub path: String,
    /// Directory baselines and reports are written under
    pub dir: PathBuf,
    pub root: bool,
}

/// One pipeline invocation
#[derive(Debug)]
pub struct GuardRequest {
    pub project: ProjectInfo,
    pub configurations: Vec<MonitoredConfiguration>,
    pub mode: GuardMode,
}

/// Outcome for one configuration that made it through the diff phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationReport {
    pub configuration: String,
    /// Configuration actually resolved; differs on root fallback
    pub resolved_as: String,
    /// Size of the mapped dependency set
    pub dependencies: usize,
    #[serde(flatten)]
    pub outcome: DiffOutcome,
}

/// Everything a run produced: successful reports plus collected failures
#[derive(Debug)]
pub struct GuardSummary {
    pub project_path: String,
    pub mode: GuardMode,
    pub reports: Vec<ConfigurationReport>,
    pub failures: Vec<GuardError>,
}

impl GuardSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reports when every configuration passed, otherwise the aggregated failure
    pub fn into_result(self) -> Result<Vec<ConfigurationReport>, GuardError> {
        match GuardError::aggregate(self.failures) {
            Some(error) => Err(error),
            None => Ok(self.reports),
        }
    }
}

/// Configuration a monitored name resolves to, honoring the root fallback
pub fn resolve_name<'a>(name: &'a str, available: &BTreeSet<String>, root: bool) -> Option<&'a str> {
    if available.contains(name) {
        Some(name)
    } else if root && available.contains(ROOT_FALLBACK_CONFIGURATION) {
        Some(ROOT_FALLBACK_CONFIGURATION)
    } else {
        None
    }
}

struct Resolved<'r> {
    configuration: &'r MonitoredConfiguration,
    resolved_as: &'r str,
    current: DependencySet,
}

/// Run the pipeline for one project
///
/// `Err` means the run stopped before any file was written: an unknown
/// configuration, or policy violations. Failures during the diff phase are
/// collected in [`GuardSummary::failures`] while remaining configurations
/// are still processed.
pub fn run(
    request: &GuardRequest,
    graphs: &dyn GraphProvider,
    fs: &dyn FileSystemProvider,
) -> Result<GuardSummary, GuardError> {
    let project = &request.project;
    let available = graphs.available_configurations();
    debug!(
        project = %project.path,
        available = available.len(),
        "Validating {} monitored configurations",
        request.configurations.len()
    );

    let mut targets = Vec::with_capacity(request.configurations.len());
    let mut missing = Vec::new();
    for configuration in &request.configurations {
        match resolve_name(&configuration.name, &available, project.root) {
            Some(resolved_as) => {
                if resolved_as != configuration.name {
                    debug!(
                        "{} falls back to {} in root project",
                        configuration.name, resolved_as
                    );
                }
                targets.push((configuration, resolved_as));
            }
            None => missing.push(GuardError::ConfigurationNotFound {
                project_path: project.path.clone(),
                configuration: configuration.name.clone(),
                available: available.iter().cloned().collect(),
            }),
        }
    }
    if let Some(error) = GuardError::aggregate(missing) {
        return Err(error);
    }

    let mut failures = Vec::new();
    let mut violations = Vec::new();
    let mut resolved = Vec::with_capacity(targets.len());
    for (configuration, resolved_as) in targets {
        let graph = match graphs.resolve(resolved_as) {
            Ok(graph) => graph,
            Err(source) => {
                failures.push(graph_failure(&project.path, configuration, &available, source));
                continue;
            }
        };

        let current = configuration.map.apply(graph.traverse());
        let unstorable = current.iter().find_map(|dependency| {
            DependencyId::name_problem(dependency.name()).map(|reason| GraphError::InvalidId {
                id: dependency.name().to_string(),
                reason,
            })
        });
        if let Some(source) = unstorable {
            failures.push(graph_failure(&project.path, configuration, &available, source));
            continue;
        }

        let verdict = policy::filter(&current, configuration.policy.as_ref());
        if !verdict.is_clean() {
            warn!(
                configuration = %configuration.name,
                count = verdict.disallowed.len(),
                "Disallowed dependencies found"
            );
            violations.push(GuardError::DisallowedDependency {
                project_path: project.path.clone(),
                configuration: configuration.name.clone(),
                disallowed: verdict
                    .disallowed
                    .iter()
                    .map(|d| d.name().to_string())
                    .collect(),
            });
            continue;
        }

        resolved.push(Resolved {
            configuration,
            resolved_as,
            current,
        });
    }
    if let Some(rejected) = GuardError::aggregate(violations) {
        return Err(match GuardError::aggregate(failures) {
            Some(earlier) => GuardError::Aggregated {
                failures: vec![earlier, rejected],
            },
            None => rejected,
        });
    }

    let writer = ReportWriter::new(BaselineStore::new(fs, project.dir.clone()), request.mode);
    let mut reports = Vec::with_capacity(resolved.len());
    for Resolved {
        configuration,
        resolved_as,
        current,
    } in resolved
    {
        let key = BaselineKey::new(project.path.clone(), configuration.name.clone());
        let dependencies = current.len();

        let outcome = writer
            .prepare(key.clone(), configuration.policy.as_ref(), current)
            .and_then(|data| writer.write(&data));
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(configuration = %configuration.name, "{}", error);
                failures.push(error);
                continue;
            }
        };

        match &outcome {
            DiffOutcome::BaselineCreated { path } => {
                info!(configuration = %configuration.name, "Baseline created at {}", path.display())
            }
            DiffOutcome::NoDiff => info!(configuration = %configuration.name, "No dependency changes"),
            DiffOutcome::HasDiff { added, removed } => {
                warn!(
                    configuration = %configuration.name,
                    added = added.len(),
                    removed = removed.len(),
                    "Dependencies changed"
                );
                failures.push(GuardError::UnexpectedDiff {
                    configuration: configuration.name.clone(),
                    message: DiffMessage::new(&key, added, removed).plain(),
                });
            }
        }

        reports.push(ConfigurationReport {
            configuration: configuration.name.clone(),
            resolved_as: resolved_as.to_string(),
            dependencies,
            outcome,
        });
    }

    Ok(GuardSummary {
        project_path: project.path.clone(),
        mode: request.mode,
        reports,
        failures,
    })
}

fn graph_failure(
    project_path: &str,
    configuration: &MonitoredConfiguration,
    available: &BTreeSet<String>,
    source: GraphError,
) -> GuardError {
    match source {
        GraphError::ConfigurationNotFound { .. } => GuardError::ConfigurationNotFound {
            project_path: project_path.to_string(),
            configuration: configuration.name.clone(),
            available: available.iter().cloned().collect(),
        },
        source => GuardError::InvalidGraph {
            configuration: configuration.name.clone(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    include!("pipeline.test.rs");
}
