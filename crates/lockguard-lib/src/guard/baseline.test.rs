use super::*;
use crate::application::session::LiveFileSystemProvider;
use crate::application::session_mocks::MockFileSystemProvider;
use tempfile::TempDir;

fn set_of(names: &[&str]) -> DependencySet {
    names.iter().map(|n| DependencyId::from_canonical(*n)).collect()
}

fn key() -> BaselineKey {
    BaselineKey::new(":app", "releaseRuntimeClasspath")
}

#[test]
fn test_serialize_is_one_name_per_line() {
    let set = set_of(&["b:2", "a:1", ":lib"]);
    assert_eq!(serialize(&set), ":lib\na:1\nb:2\n");
    assert_eq!(serialize(&DependencySet::new()), "");
}

#[test]
fn test_parse_accepts_serialized_output() {
    let set = set_of(&["com.squareup.okio:okio:3.6.0", ":lib:core"]);
    let parsed = parse(&serialize(&set), Path::new("x.txt")).unwrap();
    assert_eq!(parsed, set);
    assert!(parse("", Path::new("x.txt")).unwrap().is_empty());
}

#[test]
fn test_parse_rejects_unsorted_content() {
    let err = parse("b:1\na:1\n", Path::new("dependencies/runtime.txt")).unwrap_err();
    match err {
        GuardError::CorruptBaseline { path, reason } => {
            assert_eq!(path, PathBuf::from("dependencies/runtime.txt"));
            assert!(reason.contains("line 2"), "{}", reason);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_rejects_duplicates_and_blank_lines() {
    assert!(matches!(
        parse("a:1\na:1\n", Path::new("x.txt")),
        Err(GuardError::CorruptBaseline { .. })
    ));
    assert!(matches!(
        parse("a:1\n\nb:1\n", Path::new("x.txt")),
        Err(GuardError::CorruptBaseline { .. })
    ));
}

#[test]
fn test_parse_requires_exact_line_format() {
    for content in ["a:1\nb:1", "a:1\r\nb:1\r\n", "a:1\n\r"] {
        match parse(content, Path::new("x.txt")) {
            Err(GuardError::CorruptBaseline { reason, .. }) => {
                assert!(
                    reason.contains("trailing newline") || reason.contains("carriage returns"),
                    "{content:?}: {reason}"
                );
            }
            other => panic!("{content:?} accepted: {other:?}"),
        }
    }
}

#[test]
fn test_paths_are_derived_from_project_and_configuration() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");
    assert_eq!(
        store.baseline_path(&key()),
        PathBuf::from("/repo/app/dependencies/releaseRuntimeClasspath.txt")
    );
    assert_eq!(
        store.report_path(&key()),
        PathBuf::from("/repo/app/build/reports/lockguard/releaseRuntimeClasspath.txt")
    );
}

#[test]
fn test_load_missing_baseline_is_none() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");
    assert!(store.load(&key()).unwrap().is_none());
}

#[test]
fn test_save_writes_report_then_baseline() {
    let fs = MockFileSystemProvider::new();
    let store = BaselineStore::new(&fs, "/repo/app");
    let set = set_of(&["a:1", "b:1"]);

    let path = store.save(&key(), &set).unwrap();

    assert_eq!(path, store.baseline_path(&key()));
    assert_eq!(
        fs.written_paths(),
        vec![store.report_path(&key()), store.baseline_path(&key())]
    );
    assert_eq!(fs.file(&path).as_deref(), Some("a:1\nb:1\n"));
    assert_eq!(store.load(&key()).unwrap(), Some(set));
}

#[test]
fn test_save_report_leaves_baseline_untouched() {
    let baseline = PathBuf::from("/repo/app/dependencies/releaseRuntimeClasspath.txt");
    let fs = MockFileSystemProvider::new().with_file(baseline.clone(), "a:1\n");
    let store = BaselineStore::new(&fs, "/repo/app");

    store.save_report(&key(), &set_of(&["a:1", "c:1"])).unwrap();

    assert_eq!(fs.file(&baseline).as_deref(), Some("a:1\n"));
    assert_eq!(
        fs.file(&store.report_path(&key())).as_deref(),
        Some("a:1\nc:1\n")
    );
}

#[test]
fn test_write_failure_names_the_path() {
    let fs = MockFileSystemProvider::new().with_read_only(PathBuf::from("/repo/app/dependencies"));
    let store = BaselineStore::new(&fs, "/repo/app");

    let err = store.save(&key(), &set_of(&["a:1"])).unwrap_err();
    match err {
        GuardError::BaselineWriteFailure { path, source } => {
            assert_eq!(path, store.baseline_path(&key()));
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_corrupt_baseline_on_disk_is_reported() {
    let fs = MockFileSystemProvider::new().with_file(
        PathBuf::from("/repo/app/dependencies/releaseRuntimeClasspath.txt"),
        "z:1\na:1\n",
    );
    let store = BaselineStore::new(&fs, "/repo/app");
    assert!(matches!(
        store.load(&key()),
        Err(GuardError::CorruptBaseline { .. })
    ));
}

#[test]
fn test_live_filesystem_round_trip() {
    let temp = TempDir::new().unwrap();
    let fs = LiveFileSystemProvider;
    let store = BaselineStore::new(&fs, temp.path());
    let set = set_of(&[":lib:core", "com.squareup.okhttp3:okhttp:4.12.0"]);

    let path = store.save(&key(), &set).unwrap();

    assert!(path.starts_with(temp.path().join("dependencies")));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        ":lib:core\ncom.squareup.okhttp3:okhttp:4.12.0\n"
    );
    assert!(store.report_path(&key()).exists());
    assert_eq!(store.load(&key()).unwrap(), Some(set));
}

#[test]
fn test_live_filesystem_overwrites_existing_baseline() {
    let temp = TempDir::new().unwrap();
    let fs = LiveFileSystemProvider;
    let store = BaselineStore::new(&fs, temp.path());

    store.save(&key(), &set_of(&["a:1", "b:1"])).unwrap();
    store.save(&key(), &set_of(&["c:1"])).unwrap();

    assert_eq!(store.load(&key()).unwrap(), Some(set_of(&["c:1"])));
}
