// Tests for resolved graph traversal

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Build a graph from (node, dependencies) pairs, rooted at `roots`
fn graph_of(edges: &[(&str, &[&str])], roots: &[&str]) -> ResolvedGraph {
    let mut graph = ResolvedGraph::new();
    for (node, deps) in edges {
        graph.add_node(DependencyId::from_canonical(*node));
        for dep in *deps {
            graph.add_node(DependencyId::from_canonical(*dep));
        }
    }
    for (node, deps) in edges {
        for dep in *deps {
            graph.add_dependency(node, dep).unwrap();
        }
    }
    for root in roots {
        graph.add_root(root).unwrap();
    }
    graph
}

const EXPORT: &str = r#"
[configurations.runtimeClasspath]
roots = [":app", "com.squareup.okhttp3:okhttp:4.12.0"]

[[configurations.runtimeClasspath.nodes]]
id = ":app"
kind = "module"
dependencies = [":lib:core"]

[[configurations.runtimeClasspath.nodes]]
id = ":lib:core"
dependencies = [":app", "com.squareup.okio:okio:3.6.0"]

[[configurations.runtimeClasspath.nodes]]
id = "com.squareup.okhttp3:okhttp:4.12.0"
kind = "artifact"
dependencies = ["com.squareup.okio:okio:3.6.0"]

[[configurations.runtimeClasspath.nodes]]
id = "com.squareup.okio:okio:3.6.0"

[configurations.testClasspath]
"#;

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = ResolvedGraph::new();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.traverse().is_empty());
}

#[test]
fn test_add_duplicate_node_is_idempotent() {
    let mut graph = ResolvedGraph::new();
    let idx1 = graph.add_node(DependencyId::artifact("a:1"));
    let idx2 = graph.add_node(DependencyId::artifact("a:1"));

    assert_eq!(idx1, idx2);
    assert_eq!(graph.node_count(), 1);
    assert!(graph.contains("a:1"));
}

#[test]
fn test_add_dependency_to_nonexistent_node() {
    let mut graph = ResolvedGraph::new();
    graph.add_node(DependencyId::artifact("a:1"));

    let result = graph.add_dependency("a:1", "missing:1");
    assert!(matches!(result, Err(GraphError::NodeNotFound { id }) if id == "missing:1"));
    assert!(graph.add_root("missing:1").is_err());
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_traverse_sorts_reachable_nodes() {
    let graph = graph_of(&[("c:3", &["a:1"]), ("a:1", &["b:2"])], &["c:3"]);
    assert_eq!(graph.traverse().names(), vec!["a:1", "b:2", "c:3"]);
}

#[test]
fn test_traverse_skips_unreachable_nodes() {
    let graph = graph_of(&[("root", &["dep"]), ("orphan", &[])], &["root"]);
    assert_eq!(graph.traverse().names(), vec!["dep", "root"]);
}

#[test]
fn test_traverse_without_roots_includes_everything() {
    let graph = graph_of(&[("root", &["dep"]), ("orphan", &[])], &[]);
    assert_eq!(graph.traverse().names(), vec!["dep", "orphan", "root"]);
}

#[test]
fn test_traverse_terminates_on_cycles() {
    let graph = graph_of(
        &[(":a", &[":b"]), (":b", &[":c"]), (":c", &[":a", "x:1"])],
        &[":a"],
    );
    assert!(graph.has_cycles());
    assert_eq!(graph.traverse().names(), vec![":a", ":b", ":c", "x:1"]);
}

#[test]
fn test_traverse_collapses_diamonds() {
    let graph = graph_of(
        &[
            ("top", &["left", "right"]),
            ("left", &["shared"]),
            ("right", &["shared"]),
        ],
        &["top"],
    );
    assert!(!graph.has_cycles());
    assert_eq!(graph.traverse().names(), vec!["left", "right", "shared", "top"]);
}

#[test]
fn test_traverse_independent_of_insertion_order_and_multiplicity() {
    let forward = graph_of(
        &[("r", &["a", "b"]), ("a", &["c"]), ("b", &["c"]), ("c", &[])],
        &["r"],
    );
    let reversed = graph_of(
        &[("c", &[]), ("b", &["c", "c"]), ("a", &["c", "c", "c"]), ("r", &["b", "a", "b"])],
        &["r", "r"],
    );
    assert!(reversed.edge_count() > forward.edge_count());
    assert_eq!(forward.traverse(), reversed.traverse());
}

// ============================================================================
// Export Parsing
// ============================================================================

#[test]
fn test_export_lists_available_configurations() {
    let provider = ExportGraphProvider::parse(EXPORT, Path::new("resolved.toml")).unwrap();
    let available: Vec<String> = provider.available_configurations().into_iter().collect();
    assert_eq!(available, vec!["runtimeClasspath", "testClasspath"]);
}

#[test]
fn test_export_resolves_cyclic_module_graph() {
    let provider = ExportGraphProvider::parse(EXPORT, Path::new("resolved.toml")).unwrap();
    let graph = provider.resolve("runtimeClasspath").unwrap();

    assert!(graph.has_cycles());
    let deps = graph.traverse();
    assert_eq!(
        deps.names(),
        vec![
            ":app",
            ":lib:core",
            "com.squareup.okhttp3:okhttp:4.12.0",
            "com.squareup.okio:okio:3.6.0"
        ]
    );
    let kinds: Vec<DependencyKind> = deps.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DependencyKind::InternalModule,
            DependencyKind::InternalModule,
            DependencyKind::ExternalArtifact,
            DependencyKind::ExternalArtifact
        ]
    );
}

#[test]
fn test_export_empty_configuration() {
    let provider = ExportGraphProvider::parse(EXPORT, Path::new("resolved.toml")).unwrap();
    assert!(provider.resolve("testClasspath").unwrap().traverse().is_empty());
}

#[test]
fn test_export_unknown_configuration() {
    let provider = ExportGraphProvider::parse(EXPORT, Path::new("resolved.toml")).unwrap();
    assert!(matches!(
        provider.resolve("kapt"),
        Err(GraphError::ConfigurationNotFound { configuration }) if configuration == "kapt"
    ));
}

#[test]
fn test_export_dangling_edge_is_rejected() {
    let content = r#"
[configurations.main]
[[configurations.main.nodes]]
id = "a:1"
dependencies = ["ghost:1"]
"#;
    let provider = ExportGraphProvider::parse(content, Path::new("resolved.toml")).unwrap();
    assert!(matches!(
        provider.resolve("main"),
        Err(GraphError::NodeNotFound { id }) if id == "ghost:1"
    ));
}

#[test]
fn test_export_parse_error_names_file() {
    let err = ExportGraphProvider::parse("[configurations", Path::new("broken.toml")).unwrap_err();
    assert!(matches!(err, GuardError::GraphParseError { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_map_provider() {
    let mut graphs = BTreeMap::new();
    graphs.insert("main".to_string(), graph_of(&[("a", &["b"])], &["a"]));

    assert!(graphs.available_configurations().contains("main"));
    assert_eq!(graphs.resolve("main").unwrap().traverse().names(), vec!["a", "b"]);
    assert!(graphs.resolve("other").is_err());
}

#[test]
fn test_export_rejects_ids_that_cannot_be_baselined() {
    for id in [r#""""#, r#""a:1\nb:1""#, r#""x:1\r""#] {
        let content = format!("[configurations.main]\n[[configurations.main.nodes]]\nid = {id}\n");
        let provider = ExportGraphProvider::parse(&content, Path::new("resolved.toml")).unwrap();
        assert!(
            matches!(provider.resolve("main"), Err(GraphError::InvalidId { .. })),
            "{id}"
        );
    }
}
