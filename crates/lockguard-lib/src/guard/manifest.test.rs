use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::guard::identifier::DependencyId;
use crate::guard::policy::AllowPolicy;
use std::path::PathBuf;

const MANIFEST: &str = r#"
[project]
path = ":app"

[[configuration]]
name = "releaseRuntimeClasspath"
deny = ["evil-*"]
strip_versions = true

[[configuration]]
name = "testRuntimeClasspath"
modules = false
allow = ["org.junit*"]
"#;

fn parse_ok(content: &str) -> GuardManifest {
    GuardManifest::parse(content, Path::new("lockguard.toml")).unwrap()
}

fn parse_err(content: &str) -> String {
    GuardManifest::parse(content, Path::new("lockguard.toml"))
        .unwrap_err()
        .to_string()
}

#[test]
fn test_parse_with_defaults() {
    let manifest = parse_ok(MANIFEST);

    assert_eq!(manifest.project.path, ":app");
    assert!(!manifest.project.is_root());
    assert_eq!(
        manifest.configuration_names(),
        vec!["releaseRuntimeClasspath", "testRuntimeClasspath"]
    );

    let release = &manifest.configurations[0];
    assert!(release.artifacts && release.modules);
    assert!(release.strip_versions);
    assert!(release.exclude.is_empty());

    let test = &manifest.configurations[1];
    assert!(!test.modules);
    assert!(!test.strip_versions);
}

#[test]
fn test_root_defaults_from_path() {
    let manifest = parse_ok("[[configuration]]\nname = \"classpath\"\n");
    assert_eq!(manifest.project.path, ":");
    assert!(manifest.project.is_root());

    let explicit = parse_ok("[project]\npath = \":\"\nroot = false\n\n[[configuration]]\nname = \"x\"\n");
    assert!(!explicit.project.is_root());
}

#[test]
fn test_sections_build_policy_and_map() {
    let manifest = parse_ok(MANIFEST);

    let policy = manifest.configurations[0].policy();
    assert!(!policy.is_allowed(&DependencyId::artifact("evil-lib:2")));
    assert!(policy.is_allowed(&DependencyId::artifact("good:1")));

    let allow_listed = manifest.configurations[1].policy();
    assert!(allow_listed.is_allowed(&DependencyId::artifact("org.junit.jupiter:junit-jupiter:5.10.0")));
    assert!(!allow_listed.is_allowed(&DependencyId::artifact("com.squareup.okio:okio:3.6.0")));

    let map = manifest.configurations[1].baseline_map();
    assert!(map.artifacts);
    assert!(!map.modules);
}

#[test]
fn test_invalid_manifests() {
    assert!(parse_err("[project]\npath = \":app\"\n").contains("no configurations"));
    assert!(parse_err("[project]\npath = \"app\"\n[[configuration]]\nname = \"x\"\n").contains("must start with ':'"));
    assert!(parse_err("[[configuration]]\nname = \"\"\n").contains("cannot be empty"));
    assert!(parse_err("[[configuration]]\nname = \"a/b\"\n").contains("path separators"));
    assert!(
        parse_err("[[configuration]]\nname = \"x\"\n[[configuration]]\nname = \"x\"\n")
            .contains("more than once")
    );
}

#[test]
fn test_syntax_error_names_file() {
    let err = GuardManifest::parse("[[configuration]\n", Path::new("/repo/lockguard.toml")).unwrap_err();
    assert!(matches!(err, GuardError::ManifestParseError { .. }));
    assert!(err.to_string().contains("/repo/lockguard.toml"));
}

#[test]
fn test_load_reads_project_directory() {
    let fs = MockFileSystemProvider::new().with_file(PathBuf::from("/repo/app/lockguard.toml"), MANIFEST);
    let manifest = GuardManifest::load(&fs, Path::new("/repo/app")).unwrap();
    assert_eq!(manifest.configurations.len(), 2);

    let missing = GuardManifest::load(&fs, Path::new("/repo/other")).unwrap_err();
    assert!(matches!(missing, GuardError::ManifestReadError { .. }));
}

#[test]
fn test_to_request_selects_configurations() {
    let manifest = parse_ok(MANIFEST);
    let dir = Path::new("/repo/app");

    let all = manifest.to_request(dir, GuardMode::Enforce, &[]).unwrap();
    assert_eq!(all.configurations.len(), 2);
    assert_eq!(all.project.path, ":app");
    assert_eq!(all.project.dir, PathBuf::from("/repo/app"));
    assert!(!all.project.root);

    let one = manifest
        .to_request(dir, GuardMode::Baseline, &["testRuntimeClasspath".to_string()])
        .unwrap();
    assert_eq!(one.mode, GuardMode::Baseline);
    assert_eq!(one.configurations.len(), 1);
    assert_eq!(one.configurations[0].name, "testRuntimeClasspath");
    assert!(!one.configurations[0].map.modules);
}

#[test]
fn test_to_request_rejects_unmonitored_names() {
    let manifest = parse_ok(MANIFEST);
    let err = manifest
        .to_request(Path::new("/repo/app"), GuardMode::Enforce, &["kapt".to_string()])
        .unwrap_err();
    assert!(err.to_string().contains("'kapt' is not monitored"));
}
