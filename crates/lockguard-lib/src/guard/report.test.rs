use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::guard::identifier::DependencyId;
use crate::guard::policy::{AllowAll, PatternPolicy};
use crate::primitives::ColorIntent;
use std::path::PathBuf;

fn set_of(names: &[&str]) -> DependencySet {
    names.iter().map(|n| DependencyId::from_canonical(*n)).collect()
}

fn key() -> BaselineKey {
    BaselineKey::new(":app", "runtimeClasspath")
}

const BASELINE: &str = "/repo/app/dependencies/runtimeClasspath.txt";

#[test]
fn test_disallowed_uses_policy() {
    let policy = PatternPolicy::deny(&["evil-*"]);
    let data = ReportData {
        key: key(),
        policy: &policy,
        current: set_of(&["good:1", "evil-lib:2"]),
        baseline: None,
    };
    assert_eq!(data.disallowed().names(), vec!["evil-lib:2"]);
    assert_eq!(data.project_path(), ":app");
    assert_eq!(data.configuration(), "runtimeClasspath");
}

#[test]
fn test_prepare_loads_baseline_in_enforce_mode() {
    let fs = MockFileSystemProvider::new().with_file(PathBuf::from(BASELINE), "A:1\nB:2\n");
    let writer = ReportWriter::new(BaselineStore::new(&fs, "/repo/app"), GuardMode::Enforce);

    let data = writer.prepare(key(), &AllowAll, set_of(&["A:1"])).unwrap();
    assert_eq!(data.baseline, Some(set_of(&["A:1", "B:2"])));
}

#[test]
fn test_prepare_skips_corrupt_baseline_in_baseline_mode() {
    let fs = MockFileSystemProvider::new().with_file(PathBuf::from(BASELINE), "b\na\n");

    let enforce = ReportWriter::new(BaselineStore::new(&fs, "/repo/app"), GuardMode::Enforce);
    assert!(matches!(
        enforce.prepare(key(), &AllowAll, set_of(&["a"])),
        Err(GuardError::CorruptBaseline { .. })
    ));

    let rebaseline = ReportWriter::new(BaselineStore::new(&fs, "/repo/app"), GuardMode::Baseline);
    let data = rebaseline.prepare(key(), &AllowAll, set_of(&["a"])).unwrap();
    assert!(data.baseline.is_none());
    let outcome = rebaseline.write(&data).unwrap();
    assert!(matches!(outcome, DiffOutcome::BaselineCreated { .. }));
    assert_eq!(fs.file(&PathBuf::from(BASELINE)).as_deref(), Some("a\n"));
}

#[test]
fn test_write_reports_diff() {
    let fs = MockFileSystemProvider::new().with_file(PathBuf::from(BASELINE), "A:1\nB:2\n");
    let writer = ReportWriter::new(BaselineStore::new(&fs, "/repo/app"), GuardMode::Enforce);

    let data = writer.prepare(key(), &AllowAll, set_of(&["A:1", "C:3"])).unwrap();
    let outcome = writer.write(&data).unwrap();

    assert_eq!(
        outcome,
        DiffOutcome::HasDiff {
            added: set_of(&["C:3"]),
            removed: set_of(&["B:2"]),
        }
    );
    assert_eq!(fs.file(&PathBuf::from(BASELINE)).as_deref(), Some("A:1\nB:2\n"));
}

#[test]
fn test_plain_diff_message() {
    let message = DiffMessage::new(&key(), &set_of(&["D:4", "C:3"]), &set_of(&["B:2"]));
    assert_eq!(
        message.plain(),
        "Dependencies changed in :app for configuration \"runtimeClasspath\"\n\
         - B:2\n\
         + C:3\n\
         + D:4\n\
         \n\
         If this is intentional, re-baseline using `lockguard baseline runtimeClasspath` in :app\n\
         Or use `lockguard baseline` to re-baseline every configuration in :app"
    );
}

#[test]
fn test_styled_and_plain_render_same_text() {
    let message = DiffMessage::new(&key(), &set_of(&["C:3"]), &set_of(&["B:2"]));
    let styled = message.render(&StyleManager::new(ColorIntent::Always));
    assert_ne!(styled, message.plain());
    assert_eq!(console::strip_ansi_codes(&styled), message.plain());
}

#[test]
fn test_from_outcome_only_for_diffs() {
    assert!(DiffMessage::from_outcome(&key(), &DiffOutcome::NoDiff).is_none());
    let created = DiffOutcome::BaselineCreated {
        path: PathBuf::from(BASELINE),
    };
    assert!(DiffMessage::from_outcome(&key(), &created).is_none());

    let diff = DiffOutcome::HasDiff {
        added: set_of(&["C:3"]),
        removed: DependencySet::new(),
    };
    let message = DiffMessage::from_outcome(&key(), &diff).unwrap();
    assert_eq!(message.added, vec!["C:3".to_string()]);
    assert!(message.removed.is_empty());
}

#[test]
fn test_fixed_messages() {
    assert_eq!(
        no_diff_message(":app", "runtimeClasspath"),
        "No dependency changes found in :app for configuration \"runtimeClasspath\""
    );
    assert_eq!(
        baseline_created_message(":app", "runtimeClasspath", Path::new(BASELINE)),
        "Dependency baseline created in :app for configuration \"runtimeClasspath\"\n\
         File: file:///repo/app/dependencies/runtimeClasspath.txt"
    );
}
