//! E2E tests for the check command
//!
//! Real project directories on disk, from first run to drift detection.

use anyhow::Result;
use lockguard_lib::application::cli::{Commands, GuardArgs};
use lockguard_lib::display::DisplayCall;
use lockguard_lib::guard::GuardError;
use lockguard_lib::testing::GraphExportBuilder;
use lockguard_tests::TestEnvironment;

const MANIFEST: &str = r#"
[project]
path = ":app"

[[configuration]]
name = "releaseRuntimeClasspath"
deny = ["*:evil-*"]

[[configuration]]
name = "testRuntimeClasspath"
modules = false
"#;

fn check() -> Commands {
    Commands::Check(GuardArgs::default())
}

/// App module with a module cycle and a diamond through okio
fn app_graph(okio: &str) -> GraphExportBuilder {
    GraphExportBuilder::new()
        .root("releaseRuntimeClasspath", ":app")
        .node("releaseRuntimeClasspath", ":app", &[":lib:core", "com.squareup.okhttp3:okhttp:4.12.0"])
        .node("releaseRuntimeClasspath", ":lib:core", &[":app", okio])
        .node("releaseRuntimeClasspath", "com.squareup.okhttp3:okhttp:4.12.0", &[okio])
        .root("testRuntimeClasspath", ":app")
        .node("testRuntimeClasspath", ":app", &["junit:junit:4.13.2"])
        .node("testRuntimeClasspath", "junit:junit:4.13.2", &["org.hamcrest:hamcrest-core:1.3"])
}

#[test]
fn e2e_first_check_creates_baselines() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.squareup.okio:okio:3.6.0"))?;

    let run = env.run(check());
    assert!(run.result.is_ok(), "{}", run.error());

    assert_eq!(
        env.baseline("releaseRuntimeClasspath").as_deref(),
        Some(":app\n:lib:core\ncom.squareup.okhttp3:okhttp:4.12.0\ncom.squareup.okio:okio:3.6.0\n")
    );
    assert_eq!(
        env.baseline("testRuntimeClasspath").as_deref(),
        Some("junit:junit:4.13.2\norg.hamcrest:hamcrest-core:1.3\n")
    );
    assert_eq!(env.report("releaseRuntimeClasspath"), env.baseline("releaseRuntimeClasspath"));
    assert!(run.output().contains("baseline created"));

    Ok(())
}

#[test]
fn e2e_repeated_checks_are_idempotent() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.squareup.okio:okio:3.6.0"))?;

    assert!(env.run(check()).result.is_ok());
    let first = env.baseline("releaseRuntimeClasspath");

    for _ in 0..2 {
        let run = env.run(check());
        assert!(run.result.is_ok(), "{}", run.error());
        assert!(run.output().contains("No dependency changes found in :app"));
    }
    assert_eq!(env.baseline("releaseRuntimeClasspath"), first);

    Ok(())
}

#[test]
fn e2e_version_bump_fails_with_diff() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.squareup.okio:okio:3.6.0"))?;
    assert!(env.run(check()).result.is_ok());
    let committed = env.baseline("releaseRuntimeClasspath");

    env.write_graph(&app_graph("com.squareup.okio:okio:3.7.0"))?;
    let run = env.run(check());

    let error = run.error();
    assert!(error.contains("Dependencies changed in :app for configuration \"releaseRuntimeClasspath\""));
    assert!(error.contains("- com.squareup.okio:okio:3.6.0\n+ com.squareup.okio:okio:3.7.0"));
    assert!(error.contains("lockguard baseline releaseRuntimeClasspath"));
    assert!(!error.contains("testRuntimeClasspath"));

    // Committed baseline untouched, report holds the new set
    assert_eq!(env.baseline("releaseRuntimeClasspath"), committed);
    assert!(env.report("releaseRuntimeClasspath").unwrap().contains("okio:3.7.0"));

    Ok(())
}

#[test]
fn e2e_disallowed_dependency_blocks_all_writes() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.example:evil-logger:1.0"))?;

    let run = env.run(check());

    let guard_error = run
        .result
        .as_ref()
        .err()
        .and_then(|e| e.downcast_ref::<GuardError>());
    assert!(matches!(guard_error, Some(GuardError::DisallowedDependency { .. })));
    assert!(run.error().contains("  - com.example:evil-logger:1.0"));
    assert!(env.baseline("releaseRuntimeClasspath").is_none());
    assert!(env.baseline("testRuntimeClasspath").is_none());

    Ok(())
}

#[test]
fn e2e_missing_configuration_fails_before_writing() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(
        &GraphExportBuilder::new().node("releaseRuntimeClasspath", "a:1", &[]),
    )?;

    let run = env.run(check());

    assert!(run.error().contains(
        "Configuration \"testRuntimeClasspath\" was not found in :app. Available configurations: releaseRuntimeClasspath"
    ));
    assert!(env.baseline("releaseRuntimeClasspath").is_none());

    Ok(())
}

#[test]
fn e2e_corrupt_baseline_is_reported() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.squareup.okio:okio:3.6.0"))?;
    env.write(
        std::path::Path::new("dependencies/releaseRuntimeClasspath.txt"),
        "b:1\na:1\n",
    )?;

    let run = env.run(check());

    assert!(run.error().contains("Corrupt baseline"));
    // The other configuration still got its baseline
    assert!(env.baseline("testRuntimeClasspath").is_some());

    Ok(())
}

#[test]
fn e2e_json_summary_lists_outcomes() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&app_graph("com.squareup.okio:okio:3.6.0"))?;

    let run = env.run(Commands::Check(GuardArgs {
        json: true,
        ..GuardArgs::default()
    }));
    assert!(run.result.is_ok(), "{}", run.error());

    let calls = run.display.get_calls();
    let [DisplayCall::Message { text }] = calls.as_slice() else {
        panic!("expected only the JSON document, got {calls:?}");
    };
    let value: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(value["success"], true);
    let outcomes: Vec<&str> = value["configurations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["outcome"].as_str().unwrap())
        .collect();
    assert_eq!(outcomes, vec!["baseline_created", "baseline_created"]);

    Ok(())
}
