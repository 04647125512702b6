use super::*;

fn set(names: &[&str]) -> DependencySet {
    names.iter().map(|n| DependencyId::from_canonical(*n)).collect()
}

#[test]
fn test_kind_inference() {
    assert_eq!(DependencyKind::infer(":lib:core"), DependencyKind::InternalModule);
    assert_eq!(
        DependencyKind::infer("com.squareup.okio:okio:3.6.0"),
        DependencyKind::ExternalArtifact
    );
}

#[test]
fn test_identity_ignores_kind() {
    let a = DependencyId::artifact("same");
    let b = DependencyId::module("same");
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);
}

#[test]
fn test_collect_sorts_and_dedups() {
    let deps = set(&["b:2", "a:1", "b:2", "c:3", "a:1"]);
    assert_eq!(deps.names(), vec!["a:1", "b:2", "c:3"]);
}

#[test]
fn test_collect_keeps_first_kind() {
    let deps: DependencySet = vec![DependencyId::module("x"), DependencyId::artifact("x")]
        .into_iter()
        .collect();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps.iter().next().unwrap().kind(), DependencyKind::InternalModule);
}

#[test]
fn test_ordering_is_bytewise() {
    // Uppercase sorts before lowercase, ':' before letters
    let deps = set(&["b", "B", ":a", "a"]);
    assert_eq!(deps.names(), vec![":a", "B", "a", "b"]);
}

#[test]
fn test_try_from_canonical_accepts_sorted() {
    let entries = vec![DependencyId::from_canonical("a"), DependencyId::from_canonical("b")];
    let deps = DependencySet::try_from_canonical(entries).unwrap();
    assert_eq!(deps.names(), vec!["a", "b"]);
}

#[test]
fn test_try_from_canonical_rejects_out_of_order() {
    let entries = vec![DependencyId::from_canonical("b"), DependencyId::from_canonical("a")];
    let err = DependencySet::try_from_canonical(entries).unwrap_err();
    assert_eq!(
        err,
        CanonicalViolation::OutOfOrder {
            index: 1,
            name: "a".to_string()
        }
    );
    assert_eq!(err.to_string(), "line 2 'a' is out of sort order");
}

#[test]
fn test_try_from_canonical_rejects_duplicates_and_blanks() {
    let dup = vec![DependencyId::from_canonical("a"), DependencyId::from_canonical("a")];
    assert!(matches!(
        DependencySet::try_from_canonical(dup),
        Err(CanonicalViolation::Duplicate { index: 1, .. })
    ));

    let blank = vec![DependencyId::from_canonical("a"), DependencyId::from_canonical("")];
    assert_eq!(
        DependencySet::try_from_canonical(blank),
        Err(CanonicalViolation::Blank { index: 1 })
    );
}

#[test]
fn test_difference() {
    let baseline = set(&["A:1", "B:2"]);
    let current = set(&["A:1", "C:3"]);

    assert_eq!(current.difference(&baseline).names(), vec!["C:3"]);
    assert_eq!(baseline.difference(&current).names(), vec!["B:2"]);
    assert!(current.difference(&current).is_empty());
    assert_eq!(current.difference(&DependencySet::new()), current);
}

#[test]
fn test_difference_interleaved() {
    let left = set(&["a", "c", "e", "g"]);
    let right = set(&["b", "c", "d", "g", "h"]);
    assert_eq!(left.difference(&right).names(), vec!["a", "e"]);
    assert_eq!(right.difference(&left).names(), vec!["b", "d", "h"]);
}

#[test]
fn test_contains() {
    let deps = set(&["a", "m", "z"]);
    assert!(deps.contains("m"));
    assert!(!deps.contains("n"));
}

#[test]
fn test_partition_is_complete_and_disjoint() {
    let deps = set(&["evil-lib:2", "good:1", "other:3"]);
    let (yes, no) = deps.partition(|d| !d.name().starts_with("evil-"));

    assert_eq!(yes.names(), vec!["good:1", "other:3"]);
    assert_eq!(no.names(), vec!["evil-lib:2"]);

    let rejoined: DependencySet = yes.iter().chain(no.iter()).cloned().collect();
    assert_eq!(rejoined, deps);
    assert!(yes.difference(&no) == yes);
}

#[test]
fn test_serializes_as_name_list() {
    let deps: DependencySet = vec![DependencyId::artifact("a:1"), DependencyId::module(":core")]
        .into_iter()
        .collect();
    let json = serde_json::to_value(&deps).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": ":core", "kind": "internal_module"},
            {"name": "a:1", "kind": "external_artifact"}
        ])
    );
}

#[test]
fn test_name_problem_flags_unstorable_names() {
    assert_eq!(DependencyId::name_problem(""), Some("is empty"));
    assert_eq!(DependencyId::name_problem("a\nb"), Some("contains a line break"));
    assert_eq!(DependencyId::name_problem("x\r"), Some("contains a line break"));
    assert_eq!(DependencyId::name_problem(":lib:core"), None);
    assert_eq!(DependencyId::name_problem("com.squareup.okio:okio:3.6.0"), None);
}
