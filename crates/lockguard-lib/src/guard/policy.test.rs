use super::*;

fn set(names: &[&str]) -> DependencySet {
    names.iter().map(|n| DependencyId::from_canonical(*n)).collect()
}

#[test]
fn test_pattern_exact() {
    let pattern = NamePattern::new("good:1");
    assert!(pattern.matches("good:1"));
    assert!(!pattern.matches("good:10"));
    assert!(!pattern.matches("xgood:1"));
}

#[test]
fn test_pattern_wildcards() {
    assert!(NamePattern::new("evil-*").matches("evil-lib:2"));
    assert!(NamePattern::new("evil-*").matches("evil-"));
    assert!(!NamePattern::new("evil-*").matches("not-evil-lib:2"));
    assert!(NamePattern::new("*:okio:*").matches("com.squareup.okio:okio:3.6.0"));
    assert!(NamePattern::new("*-SNAPSHOT").matches("a:b:1.0-SNAPSHOT"));
    assert!(NamePattern::new("*").matches(""));
    assert!(NamePattern::new("a*b*c").matches("abc"));
    assert!(!NamePattern::new("a*b*c").matches("acb"));
    // Overlapping prefix and suffix must not share characters
    assert!(!NamePattern::new("ab*ba").matches("aba"));
}

#[test]
fn test_closure_policy() {
    let policy = |d: &DependencyId| !d.name().starts_with("evil-");
    let verdict = filter(&set(&["good:1", "evil-lib:2"]), &policy);

    assert_eq!(verdict.allowed.names(), vec!["good:1"]);
    assert_eq!(verdict.disallowed.names(), vec!["evil-lib:2"]);
    assert!(!verdict.is_clean());
}

#[test]
fn test_allow_all() {
    let deps = set(&["a", "b"]);
    let verdict = filter(&deps, &AllowAll);
    assert_eq!(verdict.allowed, deps);
    assert!(verdict.is_clean());
}

#[test]
fn test_pattern_policy_deny_wins_over_allow() {
    let policy = PatternPolicy::new(
        vec![NamePattern::new("com.bad:*")],
        vec![NamePattern::new("com.*")],
    );
    assert!(policy.is_allowed(&DependencyId::artifact("com.good:lib:1")));
    assert!(!policy.is_allowed(&DependencyId::artifact("com.bad:lib:1")));
    assert!(!policy.is_allowed(&DependencyId::artifact("org.other:lib:1")));
}

#[test]
fn test_partition_completeness_across_policies() {
    let deps = set(&[":core", "a:1", "evil-x:1", "evil-y:2", "z:9"]);
    let policies: Vec<Box<dyn AllowPolicy>> = vec![
        Box::new(AllowAll),
        Box::new(PatternPolicy::deny(&["evil-*"])),
        Box::new(PatternPolicy::deny(&["*"])),
        Box::new(|d: &DependencyId| d.kind() == DependencyKind::InternalModule),
    ];

    for policy in &policies {
        let verdict = filter(&deps, policy.as_ref());
        assert!(verdict.allowed.difference(&verdict.disallowed) == verdict.allowed);
        let union: DependencySet = verdict
            .allowed
            .iter()
            .chain(verdict.disallowed.iter())
            .cloned()
            .collect();
        assert_eq!(union, deps);
        assert_eq!(verdict.allowed.len() + verdict.disallowed.len(), deps.len());
    }
}

#[test]
fn test_baseline_map_identity() {
    let deps = set(&[":core", "a:b:1"]);
    assert_eq!(BaselineMap::identity().apply(deps.clone()), deps);
}

#[test]
fn test_baseline_map_kind_switches() {
    let deps = set(&[":core", "a:b:1"]);
    let artifacts_only = BaselineMap {
        modules: false,
        ..BaselineMap::identity()
    };
    assert_eq!(artifacts_only.apply(deps.clone()).names(), vec!["a:b:1"]);

    let modules_only = BaselineMap {
        artifacts: false,
        ..BaselineMap::identity()
    };
    assert_eq!(modules_only.apply(deps).names(), vec![":core"]);
}

#[test]
fn test_baseline_map_exclude_and_strip() {
    let deps = set(&[
        ":core",
        "com.google:guava:31.0",
        "com.google:guava:32.0",
        "org.junit:junit:4.13",
        "plain",
    ]);
    let map = BaselineMap {
        exclude: vec![NamePattern::new("org.junit:*")],
        strip_versions: true,
        ..BaselineMap::identity()
    };

    // Two guava versions collapse into one canonical entry
    assert_eq!(map.apply(deps).names(), vec![":core", "com.google:guava", "plain"]);
}
