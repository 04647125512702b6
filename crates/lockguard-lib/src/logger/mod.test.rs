use super::*;

fn config_at(level: LogLevel) -> LoggerConfig {
    LoggerConfig {
        level,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    }
}

#[test]
fn test_filter_scopes_lockguard_targets() {
    let filter = filter_for(&config_at(LogLevel::Debug));
    assert_eq!(filter, "warn,lockguard=debug,lockguard_lib=debug");
}

#[test]
fn test_filter_parses_as_env_filter() {
    for verbosity in 0..=4 {
        let filter = filter_for(&config_at(LogLevel::from_verbosity(verbosity)));
        assert!(EnvFilter::try_new(&filter).is_ok(), "bad filter: {}", filter);
    }
}

#[test]
fn test_logger_not_initialized_initially() {
    // Another test in the same process may have installed it
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
