//! Command execution handlers
//!
//! Session-based architecture for command execution.
//! Implements the Session-Scoped Dependency Injection Pattern.

use crate::application::cli::GuardArgs;
use crate::application::session::{CommandSession, Session};
use crate::application::{AppConfig, CliConfig, Commands};
use crate::guard::pipeline::{self, ConfigurationReport, GuardSummary, resolve_name};
use crate::guard::report::{DiffMessage, baseline_created_message, no_diff_message};
use crate::guard::{
    BaselineKey, BaselineStore, DiffOutcome, ExportGraphProvider, GraphProvider, GuardError,
    GuardManifest, GuardMode,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default location of the resolved graph export, relative to the workdir
pub const DEFAULT_GRAPH_PATH: &str = "build/lockguard/resolved.toml";

/// Machine-readable summary printed by `--json`
#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    project: &'a str,
    mode: GuardMode,
    success: bool,
    configurations: &'a [ConfigurationReport],
    failures: Vec<String>,
}

/// Execute CLI commands using the session-based architecture
pub fn execute_command(config: CliConfig) -> Result<()> {
    let app_config = AppConfig::resolve(config.app_config)?;
    AppConfig::init_global(app_config.clone())?;

    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("lockguard - dependency drift guard");
            session
                .display()
                .status()
                .subtle("Run 'lockguard --help' for usage information");
            return Ok(());
        }
    };

    execute_command_with_session(command, &session)
}

/// Execute a specific command with a provided session (for testing)
pub fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    match command {
        Commands::Check(args) => handle_guard(session, GuardMode::Enforce, args),
        Commands::Baseline(args) => handle_guard(session, GuardMode::Baseline, args),
        Commands::List { graph } => handle_list(session, graph),
        Commands::Version => handle_version(session),
    }
}

fn graph_path(workdir: &Path, graph: Option<PathBuf>) -> PathBuf {
    match graph {
        Some(path) if path.is_absolute() => path,
        Some(path) => workdir.join(path),
        None => workdir.join(DEFAULT_GRAPH_PATH),
    }
}

fn handle_version(session: &dyn Session) -> Result<()> {
    session
        .display()
        .status()
        .section(&format!("lockguard {}", env!("CARGO_PKG_VERSION")));
    session
        .display()
        .status()
        .message("Guards resolved dependency sets against unintended drift");
    Ok(())
}

fn handle_guard(session: &dyn Session, mode: GuardMode, args: GuardArgs) -> Result<()> {
    let workdir = session
        .workdir()
        .context("Failed to resolve working directory")?;
    let manifest = GuardManifest::load(session.filesystem(), &workdir)?;
    let request = manifest.to_request(&workdir, mode, &args.configurations)?;
    let graphs = ExportGraphProvider::load(session.filesystem(), &graph_path(&workdir, args.graph))?;

    let status = session.display().status();
    if !args.json {
        let verb = match mode {
            GuardMode::Enforce => "Checking",
            GuardMode::Baseline => "Baselining",
        };
        status.section(&format!(
            "{} {} configuration(s) in {}",
            verb,
            request.configurations.len(),
            request.project.path
        ));
    }

    // With --json, stdout carries the summary document and nothing else
    let summary = match pipeline::run(&request, &graphs, session.filesystem()) {
        Ok(summary) => summary,
        Err(error) => {
            if args.json {
                let summary = JsonSummary {
                    project: &request.project.path,
                    mode,
                    success: false,
                    configurations: &[],
                    failures: error.failures().iter().map(ToString::to_string).collect(),
                };
                status.message(&serde_json::to_string_pretty(&summary)?);
            } else {
                status.error(&request.project.path, "stopped before diffing");
            }
            return Err(error.into());
        }
    };

    if args.json {
        let json = JsonSummary {
            project: &summary.project_path,
            mode,
            success: summary.is_success(),
            configurations: &summary.reports,
            failures: summary.failures.iter().map(ToString::to_string).collect(),
        };
        status.message(&serde_json::to_string_pretty(&json)?);
        summary.into_result()?;
        return Ok(());
    }

    render_summary(session, &summary);
    let reports = summary.into_result()?;
    status.info(&format!(
        "{} configuration(s) passed in {}",
        reports.len(),
        request.project.path
    ));
    Ok(())
}

fn render_summary(session: &dyn Session, summary: &GuardSummary) {
    let status = session.display().status();
    for report in &summary.reports {
        let key = BaselineKey::new(summary.project_path.as_str(), report.configuration.as_str());
        match &report.outcome {
            DiffOutcome::BaselineCreated { path } => {
                status.success(&report.configuration, "baseline created");
                status.subtle(&baseline_created_message(&key.project_path, &key.configuration, path));
            }
            DiffOutcome::NoDiff => {
                status.success(&no_diff_message(&key.project_path, &key.configuration), "");
            }
            DiffOutcome::HasDiff { added, removed } => {
                status.error(&report.configuration, "dependencies changed");
                status.message(&DiffMessage::new(&key, added, removed).render(session.display().styling()));
            }
        }
    }
    for failure in &summary.failures {
        if !matches!(failure, GuardError::UnexpectedDiff { .. }) {
            status.error("failed", &failure.to_string());
        }
    }
}

fn handle_list(session: &dyn Session, graph: Option<PathBuf>) -> Result<()> {
    let workdir = session
        .workdir()
        .context("Failed to resolve working directory")?;
    let manifest = GuardManifest::load(session.filesystem(), &workdir)?;
    let status = session.display().status();

    // The export only exists after the host has resolved; listing still works without it
    let available = match ExportGraphProvider::load(session.filesystem(), &graph_path(&workdir, graph)) {
        Ok(graphs) => Some(graphs.available_configurations()),
        Err(error) => {
            status.warning(&error.to_string());
            None
        }
    };

    let store = BaselineStore::new(session.filesystem(), workdir.clone());
    status.section(&format!(
        "Monitored configurations in {}",
        manifest.project.path
    ));

    let items: Vec<String> = manifest
        .configurations
        .iter()
        .map(|configuration| {
            let name = configuration.name.as_str();
            let resolution = match &available {
                None => "graph unavailable".to_string(),
                Some(available) => match resolve_name(name, available, manifest.project.is_root()) {
                    Some(resolved) if resolved == name => "resolvable".to_string(),
                    Some(resolved) => format!("resolves as {}", resolved),
                    None => "not found".to_string(),
                },
            };
            let key = BaselineKey::new(manifest.project.path.as_str(), name);
            let baseline = if session.filesystem().exists(&store.baseline_path(&key)) {
                "baseline present"
            } else {
                "no baseline"
            };
            format!("{} ({}, {})", name, resolution, baseline)
        })
        .collect();
    let items: Vec<&str> = items.iter().map(String::as_str).collect();
    status.list(&items);

    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
