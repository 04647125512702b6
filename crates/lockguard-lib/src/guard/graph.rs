//! Resolved dependency graphs and their canonical traversal
//!
//! The host build system resolves each configuration and hands the result
//! over as a graph export. This module turns an export into a
//! [`ResolvedGraph`] and walks it into a [`DependencySet`].

use super::GuardError;
use super::identifier::{DependencyId, DependencyKind, DependencySet};
use crate::application::session::FileSystemProvider;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while building or resolving a graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("No resolved graph for configuration '{configuration}'")]
    ConfigurationNotFound { configuration: String },

    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Invalid dependency id {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },
}

/// Resolved dependency graph for one configuration
///
/// Edges point from a dependent to its dependency. Nodes are keyed by
/// canonical name, so adding the same coordinate twice yields one node.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    graph: DiGraph<DependencyId, ()>,
    node_map: HashMap<String, NodeIndex>,
    roots: Vec<NodeIndex>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (idempotent - an existing node keeps its first kind)
    pub fn add_node(&mut self, id: DependencyId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id.name()) {
            trace!("Node already exists: {}", id);
            return idx;
        }

        let name = id.name().to_string();
        let idx = self.graph.add_node(id);
        self.node_map.insert(name, idx);
        idx
    }

    /// Record that `from` depends on `to`. Both must already be nodes.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        self.graph.add_edge(from_idx, to_idx, ());
        Ok(())
    }

    /// Mark a node as directly declared by the configuration
    pub fn add_root(&mut self, name: &str) -> Result<(), GraphError> {
        let idx = self.index_of(name)?;
        if !self.roots.contains(&idx) {
            self.roots.push(idx);
        }
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.node_map
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound {
                id: name.to_string(),
            })
    }

    /// Walk every node reachable from the roots exactly once and return the
    /// canonical set. With no roots declared, every node is a starting point.
    ///
    /// Cycles and diamonds are harmless: a node is skipped once its name has
    /// been seen, and the result is sorted, so neither traversal order nor
    /// edge multiplicity can change the output.
    pub fn traverse(&self) -> DependencySet {
        let starts: Vec<NodeIndex> = if self.roots.is_empty() {
            self.graph.node_indices().collect()
        } else {
            self.roots.clone()
        };

        let mut visited: HashSet<&str> = HashSet::with_capacity(self.graph.node_count());
        let mut collected = Vec::with_capacity(self.graph.node_count());
        let mut stack: Vec<NodeIndex> = starts.into_iter().rev().collect();

        while let Some(idx) = stack.pop() {
            let node = &self.graph[idx];
            if !visited.insert(node.name()) {
                continue;
            }
            trace!("Visiting {}", node);
            collected.push(node.clone());
            stack.extend(self.graph.neighbors(idx));
        }

        collected.into_iter().collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Module-to-module back references show up as cycles
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }
}

/// Source of resolved graphs, keyed by configuration name
pub trait GraphProvider {
    /// Names of every configuration the project can resolve
    fn available_configurations(&self) -> BTreeSet<String>;

    /// Resolve one configuration
    fn resolve(&self, configuration: &str) -> Result<ResolvedGraph, GraphError>;
}

impl GraphProvider for BTreeMap<String, ResolvedGraph> {
    fn available_configurations(&self) -> BTreeSet<String> {
        self.keys().cloned().collect()
    }

    fn resolve(&self, configuration: &str) -> Result<ResolvedGraph, GraphError> {
        self.get(configuration)
            .cloned()
            .ok_or_else(|| GraphError::ConfigurationNotFound {
                configuration: configuration.to_string(),
            })
    }
}

// ============================================================================
// GRAPH EXPORT FILE
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct GraphExport {
    #[serde(default)]
    configurations: BTreeMap<String, ConfigurationExport>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigurationExport {
    #[serde(default)]
    roots: Vec<String>,
    #[serde(default)]
    nodes: Vec<NodeExport>,
}

#[derive(Debug, Clone, Deserialize)]
struct NodeExport {
    id: String,
    #[serde(default)]
    kind: Option<NodeKindExport>,
    #[serde(default)]
    dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKindExport {
    Artifact,
    Module,
}

/// Graph provider backed by a `resolved.toml` export written by the host
#[derive(Debug, Clone)]
pub struct ExportGraphProvider {
    path: PathBuf,
    export: GraphExport,
}

impl ExportGraphProvider {
    /// Read and parse an export file
    pub fn load(fs: &dyn FileSystemProvider, path: &Path) -> Result<Self, GuardError> {
        debug!("Loading resolved graph export: {}", path.display());

        let content = fs
            .read_to_string(path)
            .map_err(|source| GuardError::GraphReadError {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&content, path)
    }

    /// Parse export content; `path` is only used for error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self, GuardError> {
        let export: GraphExport =
            toml::from_str(content).map_err(|source| GuardError::GraphParseError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            export,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphProvider for ExportGraphProvider {
    fn available_configurations(&self) -> BTreeSet<String> {
        self.export.configurations.keys().cloned().collect()
    }

    fn resolve(&self, configuration: &str) -> Result<ResolvedGraph, GraphError> {
        let export = self.export.configurations.get(configuration).ok_or_else(|| {
            GraphError::ConfigurationNotFound {
                configuration: configuration.to_string(),
            }
        })?;

        let mut graph = ResolvedGraph::new();
        for node in &export.nodes {
            if let Some(reason) = DependencyId::name_problem(&node.id) {
                return Err(GraphError::InvalidId {
                    id: node.id.clone(),
                    reason,
                });
            }
            let kind = match node.kind {
                Some(NodeKindExport::Artifact) => DependencyKind::ExternalArtifact,
                Some(NodeKindExport::Module) => DependencyKind::InternalModule,
                None => DependencyKind::infer(&node.id),
            };
            graph.add_node(DependencyId::new(node.id.clone(), kind));
        }

        for node in &export.nodes {
            for dependency in &node.dependencies {
                graph.add_dependency(&node.id, dependency)?;
            }
        }

        for root in &export.roots {
            graph.add_root(root)?;
        }

        debug!(
            configuration,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            cyclic = graph.has_cycles(),
            "Resolved graph"
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    include!("graph.test.rs");
}
