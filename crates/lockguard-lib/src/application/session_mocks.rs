//! Mock implementations of session providers for testing
//!
//! These mocks let command handlers and the guard pipeline run against an
//! in-memory filesystem with recorded display output.

use crate::application::config::AppConfig;
use crate::application::session::{CommandSession, ConfigProvider, FileSystemProvider};
use crate::display::MockDisplayProvider;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock filesystem provider for testing
#[derive(Clone)]
pub struct MockFileSystemProvider {
    pub current_dir: PathBuf,
    /// In-memory filesystem: path -> content
    pub files: Arc<Mutex<HashMap<PathBuf, String>>>,
    /// Every path passed to `write_atomic`, in call order
    pub writes: Arc<Mutex<Vec<PathBuf>>>,
    /// Writes below any of these directories fail with PermissionDenied
    pub read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        Self {
            current_dir: PathBuf::from("/test/workdir"),
            files: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            read_only: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn with_current_dir(mut self, dir: PathBuf) -> Self {
        self.current_dir = dir;
        self
    }

    pub fn with_file(self, path: PathBuf, content: impl Into<String>) -> Self {
        self.files.lock().unwrap().insert(path, content.into());
        self
    }

    pub fn with_read_only(self, dir: PathBuf) -> Self {
        self.read_only.lock().unwrap().insert(dir);
        self
    }

    /// Content currently stored at `path`
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Paths written so far
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                )
            })
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let denied = self
            .read_only
            .lock()
            .unwrap()
            .iter()
            .any(|dir| path.starts_with(dir));
        if denied {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Read-only: {}", path.display()),
            ));
        }

        self.writes.lock().unwrap().push(path.to_path_buf());
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// Mock config provider for testing
pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Session wired entirely from mocks
pub type MockCommandSession =
    CommandSession<MockFileSystemProvider, MockDisplayProvider, MockConfigProvider>;

/// Build a mock session rooted at `workdir`; returns handles for assertions
pub fn mock_session(
    workdir: &Path,
    filesystem: MockFileSystemProvider,
) -> (MockCommandSession, MockFileSystemProvider, MockDisplayProvider) {
    let app_config = AppConfig {
        workdir: Some(workdir.to_path_buf()),
        ..AppConfig::default()
    };
    let display = MockDisplayProvider::new();
    let session = CommandSession::new_with_providers(
        filesystem.clone(),
        display.clone(),
        MockConfigProvider::new(app_config),
    );
    (session, filesystem, display)
}
