use super::*;

// =============================================================================
// PARSING
// =============================================================================

/// Every variant's primary clap name parses back to the same variant
fn assert_names_parse<T>()
where
    T: ValueEnum + FromStr<Err = ConfigError> + PartialEq + std::fmt::Debug,
{
    for variant in T::value_variants() {
        let name = variant
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        assert_eq!(name.parse::<T>().ok().as_ref(), Some(variant), "name '{name}'");
    }
}

fn assert_aliases<T>(cases: &[(&str, T)])
where
    T: FromStr<Err = ConfigError> + PartialEq + std::fmt::Debug,
{
    for (input, expected) in cases {
        assert_eq!(input.parse::<T>().ok().as_ref(), Some(expected), "input '{input}'");
    }
}

#[test]
fn test_primary_names_parse() {
    assert_names_parse::<LogLevel>();
    assert_names_parse::<LogFormat>();
    assert_names_parse::<LogOutput>();
    assert_names_parse::<ColorIntent>();
}

#[test]
fn test_aliases_parse_case_insensitively() {
    assert_aliases(&[
        ("fatal", LogLevel::Error),
        ("WARNING", LogLevel::Warning),
        (" information ", LogLevel::Info),
        ("verbose", LogLevel::Trace),
    ]);
    assert_aliases(&[
        ("plain", LogFormat::Text),
        ("Json", LogFormat::Json),
        ("yml", LogFormat::Yaml),
    ]);
    assert_aliases(&[
        ("force", ColorIntent::Always),
        ("yes", ColorIntent::Always),
        ("none", ColorIntent::Never),
    ]);
}

// =============================================================================
// BEHAVIOR
// =============================================================================

#[test]
fn test_unknown_value_reports_reason() {
    let err = "sometimes".parse::<ColorIntent>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse configuration value 'sometimes': invalid color intent"
    );
}

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_filter_directives() {
    assert_eq!(LogLevel::Warning.as_filter_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_filter_directive(), "trace");
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::AlreadyInitialized;
    assert_eq!(
        error.to_string(),
        "Global configuration already initialized"
    );

    let error = ConfigError::InvalidWorkDir {
        path: "/invalid/path".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid working directory: /invalid/path"
    );
}
