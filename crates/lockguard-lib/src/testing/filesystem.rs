//! Filesystem-based integration testing utilities
//!
//! - Automatic temporary directory creation and cleanup
//! - Isolation between test runs
//! - Builders for the guard's input files

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    /// Create a new temporary directory fixture
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write content to a file within the temporary directory
    pub fn write_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(())
    }

    /// Read content from a file within the temporary directory
    pub fn read_file(&self, file_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);
        let content = fs::read_to_string(&full_path)?;
        Ok(content)
    }

    /// Check if a file exists within the temporary directory
    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct ExportConfiguration {
    roots: Vec<String>,
    nodes: Vec<ExportNode>,
}

#[derive(Debug, Clone, Serialize)]
struct ExportNode {
    id: String,
    dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Export {
    configurations: BTreeMap<String, ExportConfiguration>,
}

/// Builds `resolved.toml` content the way a host build would export it
///
/// Ids referenced as roots or dependencies but never declared are added as
/// leaf nodes when rendering.
#[derive(Debug, Clone, Default)]
pub struct GraphExportBuilder {
    export: Export,
}

impl GraphExportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a configuration, possibly empty
    pub fn configuration(mut self, name: &str) -> Self {
        self.export.configurations.entry(name.to_string()).or_default();
        self
    }

    pub fn root(mut self, configuration: &str, id: &str) -> Self {
        self.entry(configuration).roots.push(id.to_string());
        self
    }

    pub fn node(mut self, configuration: &str, id: &str, dependencies: &[&str]) -> Self {
        self.entry(configuration).nodes.push(ExportNode {
            id: id.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        });
        self
    }

    fn entry(&mut self, configuration: &str) -> &mut ExportConfiguration {
        self.export
            .configurations
            .entry(configuration.to_string())
            .or_default()
    }

    pub fn render(&self) -> Result<String, toml::ser::Error> {
        let mut export = self.export.clone();
        for configuration in export.configurations.values_mut() {
            let declared: Vec<String> = configuration.nodes.iter().map(|n| n.id.clone()).collect();
            let mut referenced: Vec<String> = configuration
                .roots
                .iter()
                .chain(configuration.nodes.iter().flat_map(|n| n.dependencies.iter()))
                .filter(|id| !declared.contains(id))
                .cloned()
                .collect();
            referenced.sort();
            referenced.dedup();
            configuration
                .nodes
                .extend(referenced.into_iter().map(|id| ExportNode {
                    id,
                    dependencies: Vec::new(),
                }));
        }
        toml::to_string(&export)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
