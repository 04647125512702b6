//! Terminal-aware styling built on `console`
//!
//! Provides semantic color intents and status symbols. Every styled string
//! degrades to the bare text when colors are off, so a plain rendering is
//! always the same text minus escapes.

use crate::primitives::ColorIntent;
use console::Style;

const CHECKMARK: &str = "✓";
const CROSS: &str = "✗";
const WARNING: &str = "!";
const INFO: &str = "·";
const ARROW: &str = "→";

/// Style manager resolved once per session from the color intent
#[derive(Debug, Clone)]
pub struct StyleManager {
    colors: bool,
}

impl StyleManager {
    /// Resolve `intent` against the terminal attached to stdout
    pub fn new(intent: ColorIntent) -> Self {
        let colors = match intent {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => console::colors_enabled(),
        };
        Self { colors }
    }

    /// Styling that never emits escapes (failure reports, files, tests)
    pub fn plain() -> Self {
        Self { colors: false }
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.colors).apply_to(text).to_string()
    }

    /// Style text with semantic success intent
    pub fn style_success(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    /// Style text with semantic error intent
    pub fn style_error(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    /// Style text with semantic warning intent
    pub fn style_warning(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    /// Style text with semantic info intent
    pub fn style_info(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    /// Style text with emphasis (bold)
    pub fn style_emphasis(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Style text as subtle/muted
    pub fn style_subtle(&self, text: &str) -> String {
        self.paint(Style::new().dim(), text)
    }

    /// Format success message with symbol and styling
    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(CHECKMARK), message)
    }

    /// Format error message with symbol and styling
    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(CROSS), message)
    }

    /// Format warning message with symbol and styling
    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(WARNING), message)
    }

    /// Format info message with symbol and styling
    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(INFO), message)
    }

    /// Format working/progress message
    pub fn format_working(&self, message: &str) -> String {
        format!("{} {}", self.style_info(ARROW), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styling_is_identity() {
        let styling = StyleManager::plain();
        assert_eq!(styling.style_error("- a:1"), "- a:1");
        assert_eq!(styling.style_emphasis("header"), "header");
        assert_eq!(styling.format_success("done"), "✓ done");
    }

    #[test]
    fn test_forced_styling_wraps_text() {
        let styling = StyleManager::new(ColorIntent::Always);
        let styled = styling.style_success("+ b:2");
        assert!(styled.contains("+ b:2"));
        assert_ne!(styled, "+ b:2");
        assert_eq!(console::strip_ansi_codes(&styled), "+ b:2");
    }

    #[test]
    fn test_never_disables_colors() {
        assert!(!StyleManager::new(ColorIntent::Never).colors_enabled());
    }
}
