//! Hermetic test environment for E2E testing
//!
//! A [`TestEnvironment`] owns a temporary project directory and runs
//! commands against it through a session with the live filesystem and a
//! recording display.

use anyhow::Result;
use lockguard_lib::application::cli::Commands;
use lockguard_lib::application::commands::execute_command_with_session;
use lockguard_lib::application::config::AppConfig;
use lockguard_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider,
};
use lockguard_lib::display::MockDisplayProvider;
use lockguard_lib::testing::GraphExportBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Session used by E2E tests: real files, recorded output
pub type HermeticSession =
    CommandSession<LiveFileSystemProvider, MockDisplayProvider, LiveConfigProvider>;

/// Isolated project directory with helpers for the guard's files
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Project directory commands run in
    pub work_path: PathBuf,
}

/// Result of one command run
pub struct CommandRun {
    pub result: Result<()>,
    pub display: MockDisplayProvider,
}

impl CommandRun {
    /// All display output joined by newlines
    pub fn output(&self) -> String {
        self.display.transcript()
    }

    /// Error text, empty when the command succeeded
    pub fn error(&self) -> String {
        match &self.result {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let work_path = temp_dir.path().join("project");
        fs::create_dir_all(&work_path)?;
        Ok(Self {
            temp_dir,
            work_path,
        })
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_path.join(relative)
    }

    /// Write `lockguard.toml`
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        self.write(Path::new("lockguard.toml"), content)
    }

    /// Write the default graph export location
    pub fn write_graph(&self, graph: &GraphExportBuilder) -> Result<()> {
        self.write(Path::new("build/lockguard/resolved.toml"), &graph.render()?)
    }

    pub fn write(&self, relative: &Path, content: &str) -> Result<()> {
        let path = self.work_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Committed baseline for `configuration`, if written
    pub fn baseline(&self, configuration: &str) -> Option<String> {
        fs::read_to_string(self.path(&format!("dependencies/{configuration}.txt"))).ok()
    }

    /// Per-run report for `configuration`, if written
    pub fn report(&self, configuration: &str) -> Option<String> {
        fs::read_to_string(self.path(&format!("build/reports/lockguard/{configuration}.txt"))).ok()
    }

    pub fn session(&self) -> (HermeticSession, MockDisplayProvider) {
        let app_config = AppConfig {
            workdir: Some(self.work_path.clone()),
            ..AppConfig::default()
        };
        let display = MockDisplayProvider::new();
        let session = CommandSession::new_with_providers(
            LiveFileSystemProvider,
            display.clone(),
            LiveConfigProvider::new(app_config),
        );
        (session, display)
    }

    /// Execute `command` in this environment
    pub fn run(&self, command: Commands) -> CommandRun {
        let (session, display) = self.session();
        let result = execute_command_with_session(command, &session);
        CommandRun { result, display }
    }
}
