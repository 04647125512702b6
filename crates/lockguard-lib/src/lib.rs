//! # lockguard Library
//!
//! Dependency drift guard: canonicalizes resolved dependency graphs, checks
//! them against allow policies and diffs them against committed baselines.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging setup
//! - [`display`] - User-facing terminal output
//! - [`guard`] - Traversal, policy, baseline and diff pipeline
//! - [`application`] - CLI interface, configuration and command sessions
//!
//! ## Quick Start
//!
//! ```no_run
//! // Parse arguments and run the selected command
//! lockguard_lib::main().unwrap();
//! ```

pub mod application;
pub mod display;
pub mod guard;
pub mod logger;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use guard::{DependencyId, DependencySet, DiffOutcome, GuardError, GuardMode};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config)
}
