//! E2E tests for the baseline and list commands

use anyhow::Result;
use lockguard_lib::application::cli::{Commands, GuardArgs};
use lockguard_lib::display::DisplayCall;
use lockguard_lib::testing::GraphExportBuilder;
use lockguard_tests::TestEnvironment;
use std::path::Path;

const MANIFEST: &str = r#"
[project]
path = ":app"

[[configuration]]
name = "compileClasspath"

[[configuration]]
name = "runtimeClasspath"
strip_versions = true
exclude = ["org.jetbrains:annotations*"]
"#;

fn graph(guava: &str) -> GraphExportBuilder {
    GraphExportBuilder::new()
        .node("compileClasspath", guava, &["com.google.guava:failureaccess:1.0.2"])
        .node("runtimeClasspath", guava, &["org.jetbrains:annotations:24.1.0"])
}

fn baseline_only(configurations: &[&str]) -> Commands {
    Commands::Baseline(GuardArgs {
        configurations: configurations.iter().map(|c| c.to_string()).collect(),
        ..GuardArgs::default()
    })
}

#[test]
fn e2e_baseline_accepts_drift() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&graph("com.google.guava:guava:32.1.3-jre"))?;
    assert!(env.run(Commands::Check(GuardArgs::default())).result.is_ok());

    env.write_graph(&graph("com.google.guava:guava:33.0.0-jre"))?;
    assert!(env.run(Commands::Check(GuardArgs::default())).result.is_err());

    let run = env.run(baseline_only(&[]));
    assert!(run.result.is_ok(), "{}", run.error());
    assert!(env.run(Commands::Check(GuardArgs::default())).result.is_ok());

    assert_eq!(
        env.baseline("compileClasspath").as_deref(),
        Some("com.google.guava:failureaccess:1.0.2\ncom.google.guava:guava:33.0.0-jre\n")
    );

    Ok(())
}

#[test]
fn e2e_baseline_map_strips_versions_and_excludes() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&graph("com.google.guava:guava:32.1.3-jre"))?;
    assert!(env.run(baseline_only(&[])).result.is_ok());

    assert_eq!(
        env.baseline("runtimeClasspath").as_deref(),
        Some("com.google.guava:guava\n")
    );

    // A version bump is invisible once versions are stripped
    env.write_graph(&graph("com.google.guava:guava:33.0.0-jre"))?;
    let run = env.run(Commands::Check(GuardArgs {
        configurations: vec!["runtimeClasspath".to_string()],
        ..GuardArgs::default()
    }));
    assert!(run.result.is_ok(), "{}", run.error());

    Ok(())
}

#[test]
fn e2e_baseline_single_configuration() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&graph("com.google.guava:guava:32.1.3-jre"))?;

    let run = env.run(baseline_only(&["compileClasspath"]));
    assert!(run.result.is_ok(), "{}", run.error());

    assert!(env.baseline("compileClasspath").is_some());
    assert!(env.baseline("runtimeClasspath").is_none());

    Ok(())
}

#[test]
fn e2e_baseline_replaces_corrupt_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&graph("com.google.guava:guava:32.1.3-jre"))?;
    env.write(Path::new("dependencies/compileClasspath.txt"), "z\na\na\n")?;

    assert!(env.run(Commands::Check(GuardArgs::default())).result.is_err());
    assert!(env.run(baseline_only(&["compileClasspath"])).result.is_ok());
    assert!(env.run(Commands::Check(GuardArgs::default())).result.is_ok());

    Ok(())
}

#[test]
fn e2e_root_project_uses_classpath_fallback() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest("[[configuration]]\nname = \"buildscript\"\n")?;
    env.write_graph(
        &GraphExportBuilder::new().node("classpath", "com.android.tools.build:gradle:8.2.0", &[]),
    )?;

    let run = env.run(baseline_only(&[]));
    assert!(run.result.is_ok(), "{}", run.error());
    assert_eq!(
        env.baseline("buildscript").as_deref(),
        Some("com.android.tools.build:gradle:8.2.0\n")
    );

    Ok(())
}

#[test]
fn e2e_list_shows_state() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_manifest(MANIFEST)?;
    env.write_graph(&GraphExportBuilder::new().node("compileClasspath", "a:1", &[]))?;
    assert!(env.run(baseline_only(&["runtimeClasspath"])).result.is_err());

    let run = env.run(Commands::List { graph: None });
    assert!(run.result.is_ok(), "{}", run.error());
    assert!(run.display.has_call(&DisplayCall::List {
        items: vec![
            "compileClasspath (resolvable, no baseline)".to_string(),
            "runtimeClasspath (not found, no baseline)".to_string(),
        ],
    }));

    Ok(())
}
