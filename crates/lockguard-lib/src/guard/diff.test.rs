use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::guard::identifier::DependencyId;

fn set_of(names: &[&str]) -> DependencySet {
    names.iter().map(|n| DependencyId::from_canonical(*n)).collect()
}

fn key() -> BaselineKey {
    BaselineKey::new(":app", "runtimeClasspath")
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_equal_sets() {
    let a = set_of(&["A:1", "B:2"]);
    assert_eq!(compare(&a, &a.clone()), DiffOutcome::NoDiff);
    assert_eq!(compare(&DependencySet::new(), &DependencySet::new()), DiffOutcome::NoDiff);
}

#[test]
fn test_compare_added_and_removed() {
    let outcome = compare(&set_of(&["A:1", "C:3"]), &set_of(&["A:1", "B:2"]));
    assert_eq!(
        outcome,
        DiffOutcome::HasDiff {
            added: set_of(&["C:3"]),
            removed: set_of(&["B:2"]),
        }
    );
    assert!(outcome.is_diff());
}

#[test]
fn test_compare_one_sided_changes() {
    match compare(&set_of(&["A:1", "B:2", "D:4"]), &set_of(&["A:1"])) {
        DiffOutcome::HasDiff { added, removed } => {
            assert_eq!(added.names(), vec!["B:2", "D:4"]);
            assert!(removed.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match compare(&DependencySet::new(), &set_of(&["A:1"])) {
        DiffOutcome::HasDiff { added, removed } => {
            assert!(added.is_empty());
            assert_eq!(removed.names(), vec!["A:1"]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_compare_added_and_removed_are_disjoint() {
    let baseline = set_of(&["a", "b", "c", "e", "g"]);
    let current = set_of(&["b", "c", "d", "f", "g", "h"]);
    let DiffOutcome::HasDiff { added, removed } = compare(&current, &baseline) else {
        panic!("expected a diff");
    };
    assert_eq!(added.names(), vec!["d", "f", "h"]);
    assert_eq!(removed.names(), vec!["a", "e"]);
    assert!(added.iter().all(|d| !removed.contains(d.name())));
}

#[test]
fn test_compare_version_bump_is_remove_plus_add() {
    let DiffOutcome::HasDiff { added, removed } = compare(
        &set_of(&["com.squareup.okio:okio:3.7.0"]),
        &set_of(&["com.squareup.okio:okio:3.6.0"]),
    ) else {
        panic!("expected a diff");
    };
    assert_eq!(added.names(), vec!["com.squareup.okio:okio:3.7.0"]);
    assert_eq!(removed.names(), vec!["com.squareup.okio:okio:3.6.0"]);
}

// ============================================================================
// evaluate
// ============================================================================

#[test]
fn test_missing_baseline_is_created() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");

    let outcome = evaluate(&store, &key(), &set_of(&["B:2", "A:1"]), None, GuardMode::Enforce).unwrap();

    let baseline_path = store.baseline_path(&key());
    assert_eq!(outcome, DiffOutcome::BaselineCreated { path: baseline_path.clone() });
    assert_eq!(fs.file(&baseline_path).as_deref(), Some("A:1\nB:2\n"));
    assert_eq!(fs.file(&store.report_path(&key())).as_deref(), Some("A:1\nB:2\n"));
}

#[test]
fn test_creation_precedence_ignores_mode() {
    for mode in [GuardMode::Enforce, GuardMode::Baseline] {
        let fs = MockFileSystemProvider::new();
        let store = BaselineStore::new(&fs, "/repo/app");
        let outcome = evaluate(&store, &key(), &set_of(&["A:1"]), None, mode).unwrap();
        assert!(matches!(outcome, DiffOutcome::BaselineCreated { .. }), "{mode:?}");
    }
}

#[test]
fn test_no_diff_writes_nothing() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");
    let set = set_of(&["A:1", "B:2"]);

    let outcome = evaluate(&store, &key(), &set, Some(&set.clone()), GuardMode::Enforce).unwrap();

    assert_eq!(outcome, DiffOutcome::NoDiff);
    assert!(fs.written_paths().is_empty());
}

#[test]
fn test_diff_writes_report_only() {
    let baseline_path = std::path::PathBuf::from("/repo/app/dependencies/runtimeClasspath.txt");
    let fs = MockFileSystemProvider::new().with_file(baseline_path.clone(), "A:1\nB:2\n");
    let store = BaselineStore::new(&fs, "/repo/app");

    let outcome = evaluate(
        &store,
        &key(),
        &set_of(&["A:1", "C:3"]),
        Some(&set_of(&["A:1", "B:2"])),
        GuardMode::Enforce,
    )
    .unwrap();

    assert_eq!(
        outcome,
        DiffOutcome::HasDiff {
            added: set_of(&["C:3"]),
            removed: set_of(&["B:2"]),
        }
    );
    assert_eq!(fs.written_paths(), vec![store.report_path(&key())]);
    assert_eq!(fs.file(&baseline_path).as_deref(), Some("A:1\nB:2\n"));
    assert_eq!(fs.file(&store.report_path(&key())).as_deref(), Some("A:1\nC:3\n"));
}

#[test]
fn test_baseline_mode_overwrites_existing_baseline() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");

    let outcome = evaluate(
        &store,
        &key(),
        &set_of(&["A:1", "C:3"]),
        Some(&set_of(&["A:1", "B:2"])),
        GuardMode::Baseline,
    )
    .unwrap();

    assert!(matches!(outcome, DiffOutcome::BaselineCreated { .. }));
    assert_eq!(
        fs.file(&store.baseline_path(&key())).as_deref(),
        Some("A:1\nC:3\n")
    );
}

#[test]
fn test_repeat_runs_are_idempotent() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");
    let current = set_of(&["A:1", "B:2"]);

    evaluate(&store, &key(), &current, None, GuardMode::Enforce).unwrap();
    let first = fs.file(&store.baseline_path(&key()));

    for _ in 0..2 {
        let loaded = store.load(&key()).unwrap();
        let outcome = evaluate(&store, &key(), &current, loaded.as_ref(), GuardMode::Enforce).unwrap();
        assert_eq!(outcome, DiffOutcome::NoDiff);
    }
    assert_eq!(fs.file(&store.baseline_path(&key())), first);
}

#[test]
fn test_write_failure_is_surfaced() {
    let fs = MockFileSystemProvider::new()
        .with_read_only(std::path::PathBuf::from("/repo/app/build"));
    let store = BaselineStore::new(&fs, "/repo/app");

    let err = evaluate(&store, &key(), &set_of(&["A:1"]), None, GuardMode::Enforce).unwrap_err();
    assert!(matches!(err, GuardError::BaselineWriteFailure { .. }));
}

#[test]
fn test_outcome_json_shape() {
    let json = serde_json::to_value(DiffOutcome::HasDiff {
        added: set_of(&["C:3"]),
        removed: set_of(&["B:2"]),
    })
    .unwrap();
    assert_eq!(json["outcome"], "has_diff");
    assert_eq!(json["added"][0]["name"], "C:3");
    assert_eq!(json["removed"][0]["name"], "B:2");

    let json = serde_json::to_value(DiffOutcome::NoDiff).unwrap();
    assert_eq!(json, serde_json::json!({ "outcome": "no_diff" }));
}
