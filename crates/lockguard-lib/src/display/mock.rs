//! Mock display provider implementation for testing
//!
//! Records every display call for assertion in unit and e2e tests.

use super::providers::*;
use super::styling::StyleManager;
use std::sync::{Arc, Mutex};

/// A single recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Section { title: String },
    Success { item: String, details: String },
    Error { item: String, details: String },
    Warning { message: String },
    Info { message: String },
    Message { text: String },
    Subtle { text: String },
    List { items: Vec<String> },
}

impl DisplayCall {
    /// Text carried by the call, for substring assertions
    pub fn text(&self) -> String {
        match self {
            DisplayCall::Section { title } => title.clone(),
            DisplayCall::Success { item, details } | DisplayCall::Error { item, details } => {
                format!("{}: {}", item, details)
            }
            DisplayCall::Warning { message } | DisplayCall::Info { message } => message.clone(),
            DisplayCall::Message { text } | DisplayCall::Subtle { text } => text.clone(),
            DisplayCall::List { items } => items.join("\n"),
        }
    }
}

/// Mock implementation of DisplayProvider that records all calls
#[derive(Clone)]
pub struct MockDisplayProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
    styling: StyleManager,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            styling: StyleManager::plain(),
        }
    }

    /// Get all recorded display calls for testing assertions
    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a specific call was made
    pub fn has_call(&self, expected: &DisplayCall) -> bool {
        self.get_calls().contains(expected)
    }

    /// All recorded text joined by newlines
    pub fn transcript(&self) -> String {
        self.get_calls()
            .iter()
            .map(DisplayCall::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for MockDisplayProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider + '_> {
        Box::new(MockStatusProvider {
            calls: self.calls.clone(),
        })
    }

    fn styling(&self) -> &StyleManager {
        &self.styling
    }
}

/// Mock status provider that records calls
pub struct MockStatusProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockStatusProvider {
    fn record(&self, call: DisplayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StatusProvider for MockStatusProvider {
    fn section(&self, title: &str) {
        self.record(DisplayCall::Section {
            title: title.to_string(),
        });
    }

    fn success(&self, item: &str, details: &str) {
        self.record(DisplayCall::Success {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn error(&self, item: &str, details: &str) {
        self.record(DisplayCall::Error {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.record(DisplayCall::Warning {
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.record(DisplayCall::Info {
            message: message.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.record(DisplayCall::Message {
            text: text.to_string(),
        });
    }

    fn subtle(&self, text: &str) {
        self.record(DisplayCall::Subtle {
            text: text.to_string(),
        });
    }

    fn list(&self, items: &[&str]) {
        self.record(DisplayCall::List {
            items: items.iter().map(|s| s.to_string()).collect(),
        });
    }
}
