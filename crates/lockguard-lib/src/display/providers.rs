//! Display provider traits for dependency injection
//!
//! Abstracts user communication behind testable traits so command handlers
//! can be exercised without touching stdout.

use super::styling::StyleManager;

/// Provider trait for all user-facing communication
pub trait DisplayProvider {
    /// Display status messages with semantic meaning
    fn status(&self) -> Box<dyn StatusProvider + '_>;

    /// Styling used when callers pre-render multi-line blocks
    fn styling(&self) -> &StyleManager;
}

/// Provider trait for status updates and user feedback
pub trait StatusProvider {
    /// Display a section header
    fn section(&self, title: &str);

    /// Display a success status with optional details
    fn success(&self, item: &str, details: &str);

    /// Display an error status with details
    fn error(&self, item: &str, details: &str);

    /// Display a warning
    fn warning(&self, message: &str);

    /// Display an info status
    fn info(&self, message: &str);

    /// Display text as-is (may already carry styling)
    fn message(&self, text: &str);

    /// Display a subtle/secondary message
    fn subtle(&self, text: &str);

    /// Display a list of items with bullets
    fn list(&self, items: &[&str]);
}
