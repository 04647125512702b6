use super::*;
use crate::primitives::{ColorIntent, LogFormat};
use clap::CommandFactory;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("lockguard").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_check_with_configurations() {
    let cli = parse(&["check", "releaseRuntimeClasspath", "--graph", "out/graph.toml", "--json"]);
    let Some(Commands::Check(args)) = cli.command else {
        panic!("expected check command");
    };
    assert_eq!(args.configurations, vec!["releaseRuntimeClasspath".to_string()]);
    assert_eq!(args.graph, Some(PathBuf::from("out/graph.toml")));
    assert!(args.json);
}

#[test]
fn test_baseline_defaults() {
    let cli = parse(&["baseline"]);
    assert_eq!(cli.command, Some(Commands::Baseline(GuardArgs::default())));
    assert_eq!(
        cli.command.as_ref().and_then(Commands::guard_mode),
        Some(GuardMode::Baseline)
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = parse(&["check", "--color", "never", "--log-format", "json", "--log-level", "3"]);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert_eq!(cli.config.log_level, 3);
}

#[test]
fn test_color_aliases() {
    assert_eq!(parse(&["--color", "force", "version"]).config.color, ColorIntent::Always);
    assert_eq!(parse(&["--color", "no", "version"]).config.color, ColorIntent::Never);
}

#[test]
fn test_guard_mode_only_for_pipeline_commands() {
    assert_eq!(Commands::Check(GuardArgs::default()).guard_mode(), Some(GuardMode::Enforce));
    assert_eq!(Commands::List { graph: None }.guard_mode(), None);
    assert_eq!(Commands::Version.guard_mode(), None);
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["lockguard", "enforce"]).is_err());
}
