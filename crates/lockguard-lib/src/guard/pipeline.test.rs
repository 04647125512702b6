// Tests for the per-project guard pipeline

use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::guard::graph::ResolvedGraph;
use crate::guard::identifier::DependencyId;
use crate::guard::policy::{NamePattern, PatternPolicy};
use std::collections::BTreeMap;

// ============================================================================
// Test Utilities
// ============================================================================

const PROJECT_DIR: &str = "/repo/app";

/// Flat graph: every name is a node and, with no roots, reachable
fn flat(names: &[&str]) -> ResolvedGraph {
    let mut graph = ResolvedGraph::new();
    for name in names {
        graph.add_node(DependencyId::from_canonical(*name));
    }
    graph
}

fn graphs(entries: &[(&str, ResolvedGraph)]) -> BTreeMap<String, ResolvedGraph> {
    entries
        .iter()
        .map(|(name, graph)| (name.to_string(), graph.clone()))
        .collect()
}

fn request(names: &[&str], mode: GuardMode) -> GuardRequest {
    GuardRequest {
        project: ProjectInfo {
            path: ":app".to_string(),
            dir: PathBuf::from(PROJECT_DIR),
            root: false,
        },
        configurations: names.iter().map(|n| MonitoredConfiguration::new(*n)).collect(),
        mode,
    }
}

fn baseline_path(configuration: &str) -> PathBuf {
    PathBuf::from(PROJECT_DIR)
        .join("dependencies")
        .join(format!("{}.txt", configuration))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_first_run_creates_baseline() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[("runtime", flat(&["B:2", "A:1"]))]);

    let summary = run(&request(&["runtime"], GuardMode::Enforce), &provider, &fs).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(
        summary.reports[0].outcome,
        DiffOutcome::BaselineCreated {
            path: baseline_path("runtime")
        }
    );
    assert_eq!(summary.reports[0].dependencies, 2);
    assert_eq!(fs.file(&baseline_path("runtime")).as_deref(), Some("A:1\nB:2\n"));
}

#[test]
fn test_unchanged_dependencies_pass() {
    let fs = MockFileSystemProvider::new().with_file(baseline_path("runtime"), "A:1\nB:2\n");
    let provider = graphs(&[("runtime", flat(&["A:1", "B:2"]))]);

    let summary = run(&request(&["runtime"], GuardMode::Enforce), &provider, &fs).unwrap();

    assert_eq!(summary.reports[0].outcome, DiffOutcome::NoDiff);
    assert!(summary.into_result().is_ok());
    assert!(fs.written_paths().is_empty());
}

#[test]
fn test_changed_dependencies_fail_with_diff_report() {
    let fs = MockFileSystemProvider::new().with_file(baseline_path("runtime"), "A:1\nB:2\n");
    let provider = graphs(&[("runtime", flat(&["A:1", "C:3"]))]);

    let summary = run(&request(&["runtime"], GuardMode::Enforce), &provider, &fs).unwrap();
    assert!(summary.reports[0].outcome.is_diff());

    let err = summary.into_result().unwrap_err();
    match err {
        GuardError::UnexpectedDiff { configuration, message } => {
            assert_eq!(configuration, "runtime");
            assert!(message.contains("- B:2\n+ C:3"), "{}", message);
            assert!(message.contains("lockguard baseline runtime"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs.file(&baseline_path("runtime")).as_deref(), Some("A:1\nB:2\n"));
}

#[test]
fn test_disallowed_dependency_fails_before_diffing() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[("runtime", flat(&["good:1", "evil-lib:2"]))]);
    let mut request = request(&["runtime"], GuardMode::Enforce);
    request.configurations[0].policy = Box::new(PatternPolicy::deny(&["evil-*"]));

    let err = run(&request, &provider, &fs).unwrap_err();

    match err {
        GuardError::DisallowedDependency { disallowed, .. } => {
            assert_eq!(disallowed, vec!["evil-lib:2".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fs.written_paths().is_empty());
}

#[test]
fn test_missing_configuration_fails_before_any_write() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[("runtime", flat(&["A:1"]))]);

    let err = run(
        &request(&["runtime", "kapt"], GuardMode::Enforce),
        &provider,
        &fs,
    )
    .unwrap_err();

    match err {
        GuardError::ConfigurationNotFound {
            configuration,
            available,
            ..
        } => {
            assert_eq!(configuration, "kapt");
            assert_eq!(available, vec!["runtime".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(fs.written_paths().is_empty());
}

// ============================================================================
// Aggregation and fallback
// ============================================================================

#[test]
fn test_every_violation_is_reported_together() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[
        ("compile", flat(&["evil-a:1", "ok:1"])),
        ("runtime", flat(&["evil-b:1"])),
    ]);
    let mut request = request(&["compile", "runtime"], GuardMode::Enforce);
    for configuration in &mut request.configurations {
        configuration.policy = Box::new(PatternPolicy::deny(&["evil-*"]));
    }

    let err = run(&request, &provider, &fs).unwrap_err();

    assert_eq!(err.failures().len(), 2);
    let text = err.to_string();
    assert!(text.contains("\"compile\""));
    assert!(text.contains("  - evil-b:1"));
}

#[test]
fn test_every_missing_configuration_is_reported_together() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[]);

    let err = run(&request(&["a", "b"], GuardMode::Enforce), &provider, &fs).unwrap_err();
    assert_eq!(err.failures().len(), 2);
    assert!(err.to_string().contains("(none)"));
}

#[test]
fn test_diffs_aggregate_across_configurations() {
    let fs = MockFileSystemProvider::new()
        .with_file(baseline_path("compile"), "A:1\n")
        .with_file(baseline_path("runtime"), "B:1\n")
        .with_file(baseline_path("test"), "C:1\n");
    let provider = graphs(&[
        ("compile", flat(&["A:2"])),
        ("runtime", flat(&["B:1"])),
        ("test", flat(&["C:2"])),
    ]);

    let summary = run(
        &request(&["compile", "runtime", "test"], GuardMode::Enforce),
        &provider,
        &fs,
    )
    .unwrap();

    assert_eq!(summary.reports.len(), 3);
    assert_eq!(summary.reports[1].outcome, DiffOutcome::NoDiff);
    let err = summary.into_result().unwrap_err();
    let failures = err.failures();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].to_string().contains("\"compile\""));
    assert!(failures[1].to_string().contains("\"test\""));
}

#[test]
fn test_corrupt_baseline_does_not_stop_other_configurations() {
    let fs = MockFileSystemProvider::new().with_file(baseline_path("compile"), "b\na\n");
    let provider = graphs(&[("compile", flat(&["a"])), ("runtime", flat(&["a"]))]);

    let summary = run(
        &request(&["compile", "runtime"], GuardMode::Enforce),
        &provider,
        &fs,
    )
    .unwrap();

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].configuration, "runtime");
    assert!(matches!(
        summary.failures.as_slice(),
        [GuardError::CorruptBaseline { .. }]
    ));
}

#[test]
fn test_baseline_mode_replaces_existing_baselines() {
    let fs = MockFileSystemProvider::new().with_file(baseline_path("runtime"), "old:1\n");
    let provider = graphs(&[("runtime", flat(&["new:1"]))]);

    let summary = run(&request(&["runtime"], GuardMode::Baseline), &provider, &fs).unwrap();

    assert!(summary.is_success());
    assert_eq!(fs.file(&baseline_path("runtime")).as_deref(), Some("new:1\n"));
}

#[test]
fn test_root_project_falls_back_to_classpath() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[("classpath", flat(&["plugin:1"]))]);
    let mut request = request(&["buildscript"], GuardMode::Enforce);

    assert!(run(&request, &provider, &fs).is_err());

    request.project.root = true;
    let summary = run(&request, &provider, &fs).unwrap();
    assert_eq!(summary.reports[0].configuration, "buildscript");
    assert_eq!(summary.reports[0].resolved_as, ROOT_FALLBACK_CONFIGURATION);
    assert_eq!(fs.file(&baseline_path("buildscript")).as_deref(), Some("plugin:1\n"));
}

#[test]
fn test_baseline_map_runs_before_policy_and_diff() {
    let fs = MockFileSystemProvider::new();
    let provider = graphs(&[(
        "runtime",
        flat(&[":lib:core", "evil-lib:1", "com.google.guava:guava:33.0"]),
    )]);
    let mut request = request(&["runtime"], GuardMode::Enforce);
    request.configurations[0].policy = Box::new(PatternPolicy::deny(&["evil-*"]));
    request.configurations[0].map = BaselineMap {
        artifacts: true,
        modules: false,
        exclude: vec![NamePattern::new("evil-*")],
        strip_versions: true,
    };

    let summary = run(&request, &provider, &fs).unwrap();

    assert!(summary.is_success());
    assert_eq!(
        fs.file(&baseline_path("runtime")).as_deref(),
        Some("com.google.guava:guava\n")
    );
}

#[test]
fn test_report_json_flattens_outcome() {
    let report = ConfigurationReport {
        configuration: "runtime".to_string(),
        resolved_as: "runtime".to_string(),
        dependencies: 0,
        outcome: DiffOutcome::NoDiff,
    };
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "configuration": "runtime",
            "resolved_as": "runtime",
            "dependencies": 0,
            "outcome": "no_diff",
        })
    );
}

#[test]
fn test_unstorable_ids_fail_without_writing() {
    for bad in ["", "a\nb", "x\r"] {
        let fs = MockFileSystemProvider::new();
        let provider = graphs(&[
            ("runtime", flat(&["A:1", bad])),
            ("compile", flat(&["A:1"])),
        ]);
        let request = request(&["runtime", "compile"], GuardMode::Enforce);

        for _ in 0..2 {
            let summary = run(&request, &provider, &fs).unwrap();
            assert_eq!(summary.reports.len(), 1, "{bad:?}");
            assert_eq!(summary.reports[0].configuration, "compile");
            assert!(matches!(
                summary.failures.as_slice(),
                [GuardError::InvalidGraph {
                    configuration,
                    source: GraphError::InvalidId { .. },
                }] if configuration == "runtime"
            ));
        }
        assert!(fs.file(&baseline_path("runtime")).is_none());
        assert_eq!(fs.file(&baseline_path("compile")).as_deref(), Some("A:1\n"));
    }
}

#[test]
fn test_request_debug_names_configurations() {
    let rendered = format!("{:?}", request(&["runtime"], GuardMode::Baseline));
    assert!(rendered.contains("\"runtime\""), "{rendered}");
    assert!(rendered.contains("Baseline"));
}
