//! Status display for user feedback
//!
//! Semantic status lines printed to stdout, replacing raw `println!` in
//! command handlers.

use super::providers::StatusProvider;
use super::styling::StyleManager;

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Render an `item: details` pair, dropping the separator when details are empty
    pub(crate) fn labelled(item: &str, details: &str) -> String {
        if details.is_empty() {
            item.to_string()
        } else {
            format!("{}: {}", item, details)
        }
    }
}

impl StatusProvider for StatusDisplay<'_> {
    fn section(&self, title: &str) {
        println!("{}", self.styling.style_emphasis(title));
    }

    /// Example: `✓ releaseRuntimeClasspath: no changes`
    fn success(&self, item: &str, details: &str) {
        println!(
            "{}",
            self.styling.format_success(&Self::labelled(item, details))
        );
    }

    fn error(&self, item: &str, details: &str) {
        println!(
            "{}",
            self.styling.format_error(&Self::labelled(item, details))
        );
    }

    fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    fn message(&self, text: &str) {
        println!("{}", text);
    }

    fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    fn list(&self, items: &[&str]) {
        for item in items {
            println!("  • {}", item);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
