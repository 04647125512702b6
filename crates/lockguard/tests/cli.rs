//! Binary-level tests: argument parsing, exit codes and stream routing

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use lockguard_lib::testing::{GraphExportBuilder, TempDirFixture};
use predicates::prelude::*;

const MANIFEST: &str = r#"
[project]
path = ":app"

[[configuration]]
name = "runtimeClasspath"
"#;

fn project(nodes: &[&str]) -> TempDirFixture {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("lockguard.toml", MANIFEST).unwrap();
    let graph = nodes
        .iter()
        .fold(GraphExportBuilder::new(), |graph, node| {
            graph.node("runtimeClasspath", node, &[])
        })
        .render()
        .unwrap();
    fixture
        .write_file("build/lockguard/resolved.toml", &graph)
        .unwrap();
    fixture
}

fn lockguard(fixture: &TempDirFixture) -> Command {
    let mut cmd = cargo_bin_cmd!("lockguard");
    cmd.current_dir(fixture.path())
        .env_remove("LOCKGUARD_WORKDIR")
        .env("NO_COLOR", "1")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn version_prints_package_version() {
    let fixture = TempDirFixture::new().unwrap();
    lockguard(&fixture)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_creates_baseline_then_passes() {
    let fixture = project(&["b:1", "a:1"]);

    lockguard(&fixture)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("baseline created"));
    assert_eq!(
        fixture.read_file("dependencies/runtimeClasspath.txt").unwrap(),
        "a:1\nb:1\n"
    );

    lockguard(&fixture)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency changes found"));
}

#[test]
fn check_exits_non_zero_on_drift() {
    let fixture = project(&["a:1", "c:1"]);
    fixture
        .write_file("dependencies/runtimeClasspath.txt", "a:1\nb:1\n")
        .unwrap();

    lockguard(&fixture)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("+ c:1"))
        .stderr(predicate::str::contains("- b:1"))
        .stderr(predicate::str::contains("lockguard baseline runtimeClasspath"));
}

#[test]
fn workdir_flag_points_at_project() {
    let fixture = project(&["a:1"]);
    let elsewhere = TempDirFixture::new().unwrap();

    lockguard(&elsewhere)
        .arg("--workdir")
        .arg(fixture.path())
        .arg("baseline")
        .assert()
        .success();
    assert!(fixture.file_exists("dependencies/runtimeClasspath.txt"));
}

#[test]
fn json_flag_prints_only_the_summary() {
    let fixture = project(&["a:1"]);

    let output = lockguard(&fixture)
        .args(["check", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["configurations"][0]["outcome"], "baseline_created");
}

#[test]
fn json_flag_keeps_stdout_parseable_on_drift() {
    let fixture = project(&["a:1", "c:1"]);
    fixture
        .write_file("dependencies/runtimeClasspath.txt", "a:1\nb:1\n")
        .unwrap();

    let output = lockguard(&fixture)
        .args(["check", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("- b:1"))
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["configurations"][0]["outcome"], "has_diff");
}

#[test]
fn missing_manifest_is_an_error() {
    let fixture = TempDirFixture::new().unwrap();
    lockguard(&fixture)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lockguard.toml"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let fixture = TempDirFixture::new().unwrap();
    lockguard(&fixture).arg("enforce").assert().failure();
}
