//! Live display provider implementation

use super::providers::{DisplayProvider, StatusProvider};
use super::status::StatusDisplay;
use super::styling::StyleManager;
use crate::primitives::ColorIntent;

/// Live implementation of DisplayProvider writing to the real terminal
pub struct LiveDisplayProvider {
    styling: StyleManager,
}

impl LiveDisplayProvider {
    pub fn new(color: ColorIntent) -> Self {
        Self {
            styling: StyleManager::new(color),
        }
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider + '_> {
        Box::new(StatusDisplay::new(&self.styling))
    }

    fn styling(&self) -> &StyleManager {
        &self.styling
    }
}
