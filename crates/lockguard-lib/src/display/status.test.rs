use super::*;

#[test]
fn test_labelled_formatting() {
    assert_eq!(StatusDisplay::labelled("runtime", "no changes"), "runtime: no changes");
    assert_eq!(StatusDisplay::labelled("runtime", ""), "runtime");
}

#[test]
fn test_status_message_formatting() {
    let styling = StyleManager::plain();
    let status = StatusDisplay::new(&styling);

    // Verify no panics across every status kind
    status.section("Checking dependencies");
    status.success("runtime", "no changes");
    status.error("compile", "changed");
    status.warning("baseline mode");
    status.info("3 configurations");
    status.message("plain");
    status.subtle("secondary");
    status.list(&["a:1", "b:2"]);
}
