//! Guard manifest handling
//! `lockguard.toml` declares the project path and its monitored configurations

use super::GuardError;
use super::diff::GuardMode;
use super::pipeline::{GuardRequest, MonitoredConfiguration, ProjectInfo};
use super::policy::{BaselineMap, NamePattern, PatternPolicy};
use crate::application::session::FileSystemProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Manifest file name looked up in the project directory
pub const MANIFEST_FILE: &str = "lockguard.toml";

/// Top-level lockguard.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardManifest {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default, rename = "configuration")]
    pub configurations: Vec<ConfigurationSection>,
}

/// `[project]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Path used in messages; `:` is the root project
    #[serde(default = "default_project_path")]
    pub path: String,

    /// Enables the build-script classpath fallback. Defaults to `path == ":"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            path: default_project_path(),
            root: None,
        }
    }
}

impl ProjectSection {
    pub fn is_root(&self) -> bool {
        self.root.unwrap_or(self.path == ":")
    }
}

/// One `[[configuration]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSection {
    pub name: String,

    #[serde(default = "default_true")]
    pub artifacts: bool,

    #[serde(default = "default_true")]
    pub modules: bool,

    #[serde(default)]
    pub deny: Vec<String>,

    #[serde(default)]
    pub allow: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub strip_versions: bool,
}

impl ConfigurationSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifacts: true,
            modules: true,
            deny: Vec::new(),
            allow: Vec::new(),
            exclude: Vec::new(),
            strip_versions: false,
        }
    }

    pub fn policy(&self) -> PatternPolicy {
        PatternPolicy::new(patterns(&self.deny), patterns(&self.allow))
    }

    pub fn baseline_map(&self) -> BaselineMap {
        BaselineMap {
            artifacts: self.artifacts,
            modules: self.modules,
            exclude: patterns(&self.exclude),
            strip_versions: self.strip_versions,
        }
    }

    fn to_monitored(&self) -> MonitoredConfiguration {
        MonitoredConfiguration::new(self.name.clone())
            .with_policy(Box::new(self.policy()))
            .with_map(self.baseline_map())
    }
}

impl GuardManifest {
    /// Read `lockguard.toml` from `project_dir`
    pub fn load(fs: &dyn FileSystemProvider, project_dir: &Path) -> Result<Self, GuardError> {
        let path = project_dir.join(MANIFEST_FILE);
        debug!("Loading manifest: {}", path.display());

        let content = fs
            .read_to_string(&path)
            .map_err(|source| GuardError::ManifestReadError {
                path: path.clone(),
                source,
            })?;

        Self::parse(&content, &path)
    }

    /// Parse and validate manifest content
    pub fn parse(content: &str, path: &Path) -> Result<Self, GuardError> {
        let manifest: GuardManifest =
            toml::from_str(content).map_err(|source| GuardError::ManifestParseError {
                path: path.to_path_buf(),
                source,
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), GuardError> {
        if !self.project.path.starts_with(':') {
            return Err(invalid(format!(
                "project path '{}' must start with ':'",
                self.project.path
            )));
        }

        if self.configurations.is_empty() {
            return Err(invalid("no configurations are monitored".to_string()));
        }

        let mut seen = HashSet::new();
        for configuration in &self.configurations {
            let name = configuration.name.as_str();
            if name.trim().is_empty() {
                return Err(invalid("configuration name cannot be empty".to_string()));
            }
            // Names become file names under dependencies/
            if name.contains(['/', '\\']) {
                return Err(invalid(format!(
                    "configuration name '{}' cannot contain path separators",
                    name
                )));
            }
            if !seen.insert(name) {
                return Err(invalid(format!(
                    "configuration '{}' is declared more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn configuration_names(&self) -> Vec<&str> {
        self.configurations.iter().map(|c| c.name.as_str()).collect()
    }

    /// Build a pipeline request; `only` restricts to a subset of the
    /// monitored configurations (empty means all)
    pub fn to_request(
        &self,
        project_dir: &Path,
        mode: GuardMode,
        only: &[String],
    ) -> Result<GuardRequest, GuardError> {
        if let Some(unknown) = only
            .iter()
            .find(|name| !self.configurations.iter().any(|c| &c.name == *name))
        {
            return Err(invalid(format!(
                "configuration '{}' is not monitored; monitored configurations: {}",
                unknown,
                self.configuration_names().join(", ")
            )));
        }

        let configurations = self
            .configurations
            .iter()
            .filter(|c| only.is_empty() || only.contains(&c.name))
            .map(ConfigurationSection::to_monitored)
            .collect();

        Ok(GuardRequest {
            project: ProjectInfo {
                path: self.project.path.clone(),
                dir: project_dir.to_path_buf(),
                root: self.project.is_root(),
            },
            configurations,
            mode,
        })
    }
}

fn patterns(raw: &[String]) -> Vec<NamePattern> {
    raw.iter().map(|p| NamePattern::new(p.as_str())).collect()
}

fn invalid(reason: String) -> GuardError {
    GuardError::InvalidManifest { reason }
}

fn default_project_path() -> String {
    ":".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
