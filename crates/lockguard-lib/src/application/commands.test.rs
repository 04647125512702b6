use super::*;
use crate::application::session_mocks::*;
use crate::display::DisplayCall;

const WORKDIR: &str = "/work/app";

const MANIFEST: &str = r#"
[project]
path = ":app"

[[configuration]]
name = "runtimeClasspath"
deny = ["evil-*"]
"#;

fn export(nodes: &[&str]) -> String {
    let mut out = String::from("[configurations.runtimeClasspath]\n");
    for node in nodes {
        out.push_str(&format!(
            "\n[[configurations.runtimeClasspath.nodes]]\nid = \"{}\"\n",
            node
        ));
    }
    out
}

fn workdir() -> PathBuf {
    PathBuf::from(WORKDIR)
}

fn project_fs(nodes: &[&str]) -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file(workdir().join("lockguard.toml"), MANIFEST)
        .with_file(workdir().join(DEFAULT_GRAPH_PATH), export(nodes))
}

fn baseline_file() -> PathBuf {
    workdir().join("dependencies/runtimeClasspath.txt")
}

fn check(json: bool) -> Commands {
    Commands::Check(GuardArgs {
        json,
        ..GuardArgs::default()
    })
}

// ===== HANDLE_VERSION TESTS =====

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_displays_version_information() {
        let (session, _fs, display) = mock_session(&workdir(), MockFileSystemProvider::new());

        execute_command_with_session(Commands::Version, &session).unwrap();

        assert!(display.has_call(&DisplayCall::Section {
            title: format!("lockguard {}", env!("CARGO_PKG_VERSION")),
        }));
    }
}

// ===== HANDLE_GUARD TESTS =====

mod handle_guard_tests {
    use super::*;

    #[test]
    fn it_creates_missing_baseline() {
        let (session, fs, display) = mock_session(&workdir(), project_fs(&["b:1", "a:1"]));

        execute_command_with_session(check(false), &session).unwrap();

        assert_eq!(fs.file(&baseline_file()).as_deref(), Some("a:1\nb:1\n"));
        assert!(display.has_call(&DisplayCall::Success {
            item: "runtimeClasspath".to_string(),
            details: "baseline created".to_string(),
        }));
    }

    #[test]
    fn it_passes_when_nothing_changed() {
        let fs = project_fs(&["a:1", "b:1"]).with_file(baseline_file(), "a:1\nb:1\n");
        let (session, fs, display) = mock_session(&workdir(), fs);

        execute_command_with_session(check(false), &session).unwrap();

        assert!(fs.written_paths().is_empty());
        assert!(display
            .transcript()
            .contains("No dependency changes found in :app for configuration \"runtimeClasspath\""));
    }

    #[test]
    fn it_fails_and_renders_diff_when_dependencies_change() {
        let fs = project_fs(&["a:1", "c:1"]).with_file(baseline_file(), "a:1\nb:1\n");
        let (session, fs, display) = mock_session(&workdir(), fs);

        let err = execute_command_with_session(check(false), &session).unwrap_err();

        assert!(err.to_string().contains("- b:1\n+ c:1"));
        assert!(display.transcript().contains("+ c:1"));
        assert_eq!(fs.file(&baseline_file()).as_deref(), Some("a:1\nb:1\n"));
    }

    #[test]
    fn it_rebaselines_in_baseline_mode() {
        let fs = project_fs(&["a:1", "c:1"]).with_file(baseline_file(), "a:1\nb:1\n");
        let (session, fs, _display) = mock_session(&workdir(), fs);

        execute_command_with_session(Commands::Baseline(GuardArgs::default()), &session).unwrap();

        assert_eq!(fs.file(&baseline_file()).as_deref(), Some("a:1\nc:1\n"));
    }

    #[test]
    fn it_rejects_disallowed_dependencies_without_writing() {
        let (session, fs, _display) = mock_session(&workdir(), project_fs(&["good:1", "evil-lib:2"]));

        let err = execute_command_with_session(check(false), &session).unwrap_err();

        let guard_error = err.downcast_ref::<GuardError>().unwrap();
        assert!(matches!(guard_error, GuardError::DisallowedDependency { .. }));
        assert!(fs.written_paths().is_empty());
    }

    #[test]
    fn it_rejects_unmonitored_configuration_arguments() {
        let (session, _fs, _display) = mock_session(&workdir(), project_fs(&["a:1"]));
        let command = Commands::Check(GuardArgs {
            configurations: vec!["kapt".to_string()],
            ..GuardArgs::default()
        });

        let err = execute_command_with_session(command, &session).unwrap_err();
        assert!(err.to_string().contains("'kapt' is not monitored"));
    }

    #[test]
    fn it_reports_missing_manifest() {
        let (session, _fs, _display) = mock_session(&workdir(), MockFileSystemProvider::new());

        let err = execute_command_with_session(check(false), &session).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GuardError>(),
            Some(GuardError::ManifestReadError { .. })
        ));
    }

    #[test]
    fn it_reads_graph_from_explicit_path() {
        let fs = MockFileSystemProvider::new()
            .with_file(workdir().join("lockguard.toml"), MANIFEST)
            .with_file(workdir().join("out/graph.toml"), export(&["a:1"]));
        let (session, fs, _display) = mock_session(&workdir(), fs);
        let command = Commands::Check(GuardArgs {
            graph: Some(PathBuf::from("out/graph.toml")),
            ..GuardArgs::default()
        });

        execute_command_with_session(command, &session).unwrap();
        assert_eq!(fs.file(&baseline_file()).as_deref(), Some("a:1\n"));
    }

    #[test]
    fn it_prints_only_the_json_summary() {
        let (session, _fs, display) = mock_session(&workdir(), project_fs(&["a:1"]));

        execute_command_with_session(check(true), &session).unwrap();

        let calls = display.get_calls();
        let [DisplayCall::Message { text }] = calls.as_slice() else {
            panic!("expected a single message, got {calls:?}");
        };
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["project"], ":app");
        assert_eq!(value["mode"], "enforce");
        assert_eq!(value["success"], true);
        assert_eq!(value["configurations"][0]["outcome"], "baseline_created");
        assert_eq!(value["configurations"][0]["dependencies"], 1);
    }

    #[test]
    fn it_reports_drift_as_json_and_fails() {
        let fs = project_fs(&["a:1", "c:1"]).with_file(baseline_file(), "a:1\nb:1\n");
        let (session, _fs, display) = mock_session(&workdir(), fs);

        assert!(execute_command_with_session(check(true), &session).is_err());

        let calls = display.get_calls();
        let [DisplayCall::Message { text }] = calls.as_slice() else {
            panic!("expected a single message, got {calls:?}");
        };
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["configurations"][0]["outcome"], "has_diff");
        assert_eq!(value["configurations"][0]["added"][0]["name"], "c:1");
        assert_eq!(value["configurations"][0]["removed"][0]["name"], "b:1");
    }
}

// ===== HANDLE_LIST TESTS =====

mod handle_list_tests {
    use super::*;

    #[test]
    fn it_lists_configurations_with_baseline_state() {
        let fs = project_fs(&["a:1"]).with_file(baseline_file(), "a:1\n");
        let (session, _fs, display) = mock_session(&workdir(), fs);

        execute_command_with_session(Commands::List { graph: None }, &session).unwrap();

        assert!(display.has_call(&DisplayCall::List {
            items: vec!["runtimeClasspath (resolvable, baseline present)".to_string()],
        }));
    }

    #[test]
    fn it_lists_without_graph_export() {
        let fs = MockFileSystemProvider::new().with_file(workdir().join("lockguard.toml"), MANIFEST);
        let (session, _fs, display) = mock_session(&workdir(), fs);

        execute_command_with_session(Commands::List { graph: None }, &session).unwrap();

        let calls = display.get_calls();
        assert!(calls.iter().any(|c| matches!(c, DisplayCall::Warning { .. })));
        assert!(display.has_call(&DisplayCall::List {
            items: vec!["runtimeClasspath (graph unavailable, no baseline)".to_string()],
        }));
    }
}
