use super::*;
use crate::primitives::{ColorIntent, LogFormat, LogOutput};
use tempfile::TempDir;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.workdir.is_none());
}

#[test]
fn test_config_merging() {
    let base = AppConfig {
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    // Defaults in the override never clobber explicit base values
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_resolve_keeps_cli_workdir() {
    let temp = TempDir::new().unwrap();
    let cli = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        log_level: 2,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli).unwrap();
    assert_eq!(config.workdir.as_deref(), Some(temp.path()));
    assert_eq!(config.log_level, 2);
}

#[test]
fn test_resolve_rejects_missing_workdir() {
    let temp = TempDir::new().unwrap();
    let cli = AppConfig {
        workdir: Some(temp.path().join("does-not-exist")),
        ..AppConfig::default()
    };

    let err = AppConfig::resolve(cli).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkDir { .. }));
}

#[test]
fn test_validate_fills_current_dir() {
    let mut config = AppConfig::default();
    config.validate().unwrap();
    assert_eq!(config.workdir, Some(std::env::current_dir().unwrap()));
}

#[test]
fn test_logger_config_follows_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };
    let logger = config.to_logger_config(false);
    assert_eq!(logger.level, crate::primitives::LogLevel::Debug);
    assert_eq!(logger.format, LogFormat::Json);
    assert!(!logger.ansi);
}
