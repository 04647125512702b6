//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns its providers.

use crate::application::config::AppConfig;
use crate::display::{DisplayProvider, LiveDisplayProvider};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    /// Get current working directory
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Read entire file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace `path` with `content` so readers see either the old file or
    /// the complete new one. Parent directories are created as needed.
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    /// Get the application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Session trait implemented by both live and test sessions
pub trait Session {
    /// Get the display provider for this session
    fn display(&self) -> &dyn DisplayProvider;

    /// Get the filesystem provider for this session
    fn filesystem(&self) -> &dyn FileSystemProvider;

    /// Get the config provider for this session
    fn config(&self) -> &dyn ConfigProvider;

    /// Project directory the command operates on
    fn workdir(&self) -> io::Result<PathBuf> {
        match &self.config().app_config().workdir {
            Some(workdir) => Ok(workdir.clone()),
            None => self.filesystem().current_dir(),
        }
    }
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // Temp file in the target directory so the rename never crosses filesystems
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, D, C>
where
    F: FileSystemProvider,
    D: DisplayProvider,
    C: ConfigProvider,
{
    /// Filesystem operations provider
    filesystem_provider: F,
    /// Display provider for this session
    display_provider: D,
    /// Configuration provider
    config_provider: C,
}

impl CommandSession<LiveFileSystemProvider, LiveDisplayProvider, LiveConfigProvider> {
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        let display_provider = LiveDisplayProvider::new(app_config.color);

        let logger_config = app_config.to_logger_config(display_provider.styling().colors_enabled());
        // A second session in the same process keeps the first subscriber
        let _ = crate::logger::Logger::init(logger_config);

        Self {
            filesystem_provider: LiveFileSystemProvider,
            display_provider,
            config_provider: LiveConfigProvider::new(app_config),
        }
    }
}

impl<F, D, C> CommandSession<F, D, C>
where
    F: FileSystemProvider,
    D: DisplayProvider,
    C: ConfigProvider,
{
    /// Create a new generic command session with custom providers (for testing)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_providers(filesystem_provider: F, display_provider: D, config_provider: C) -> Self {
        Self {
            filesystem_provider,
            display_provider,
            config_provider,
        }
    }
}

impl<F, D, C> Session for CommandSession<F, D, C>
where
    F: FileSystemProvider,
    D: DisplayProvider,
    C: ConfigProvider,
{
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }
}
