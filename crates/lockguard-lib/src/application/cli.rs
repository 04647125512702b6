use crate::guard::GuardMode;
use crate::primitives::ConfigError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;
use super::loader::load_env_files;

/// lockguard CLI - dependency drift guard
#[derive(Debug, Clone, Parser)]
#[command(name = "lockguard")]
#[command(about = "Guards resolved dependency sets against unintended drift")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// lockguard commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    ///
    /// Environment files are read first so their `LOCKGUARD_*` values reach
    /// clap's `env` fallbacks.
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        Ok(Cli::parse().into())
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Arguments shared by `check` and `baseline`
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct GuardArgs {
    /// Monitored configurations to process (default: all)
    #[arg(value_name = "CONFIGURATION")]
    pub configurations: Vec<String>,

    /// Resolved graph export (default: build/lockguard/resolved.toml)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Print a JSON summary of every configuration's outcome
    #[arg(long)]
    pub json: bool,
}

/// Available lockguard commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Compare resolved dependencies against the committed baselines
    Check(GuardArgs),

    /// Record resolved dependencies as the new baselines
    Baseline(GuardArgs),

    /// Show monitored configurations and their baseline state
    List {
        /// Resolved graph export (default: build/lockguard/resolved.toml)
        #[arg(long, value_name = "FILE")]
        graph: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Guard mode for commands that run the pipeline
    pub fn guard_mode(&self) -> Option<GuardMode> {
        match self {
            Commands::Check(_) => Some(GuardMode::Enforce),
            Commands::Baseline(_) => Some(GuardMode::Baseline),
            Commands::List { .. } | Commands::Version => None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
