use super::*;

#[test]
fn test_configuration_not_found_lists_available() {
    let err = GuardError::ConfigurationNotFound {
        project_path: ":app".to_string(),
        configuration: "kapt".to_string(),
        available: vec!["compileClasspath".to_string(), "runtimeClasspath".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Configuration \"kapt\" was not found in :app. Available configurations: compileClasspath, runtimeClasspath"
    );

    let none = GuardError::ConfigurationNotFound {
        project_path: ":".to_string(),
        configuration: "kapt".to_string(),
        available: Vec::new(),
    };
    assert!(none.to_string().ends_with("Available configurations: (none)"));
}

#[test]
fn test_disallowed_message_lists_every_violation() {
    let err = GuardError::DisallowedDependency {
        project_path: ":app".to_string(),
        configuration: "runtime".to_string(),
        disallowed: vec!["evil-a:1".to_string(), "evil-b:2".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Disallowed dependencies found in :app for configuration \"runtime\":\n  - evil-a:1\n  - evil-b:2"
    );
}

#[test]
fn test_aggregate() {
    assert!(GuardError::aggregate(Vec::new()).is_none());

    let single = GuardError::aggregate(vec![GuardError::InvalidManifest {
        reason: "x".to_string(),
    }])
    .unwrap();
    assert!(matches!(single, GuardError::InvalidManifest { .. }));

    let many = GuardError::aggregate(vec![
        GuardError::InvalidManifest {
            reason: "first".to_string(),
        },
        GuardError::InvalidManifest {
            reason: "second".to_string(),
        },
    ])
    .unwrap();
    assert_eq!(
        many.to_string(),
        "Invalid manifest: first\n\nInvalid manifest: second"
    );
    assert_eq!(many.failures().len(), 2);
}

#[test]
fn test_failures_flattens_nested_aggregates() {
    let nested = GuardError::Aggregated {
        failures: vec![
            GuardError::Aggregated {
                failures: vec![
                    GuardError::InvalidManifest { reason: "a".to_string() },
                    GuardError::InvalidManifest { reason: "b".to_string() },
                ],
            },
            GuardError::InvalidManifest { reason: "c".to_string() },
        ],
    };
    assert_eq!(nested.failures().len(), 3);
}
