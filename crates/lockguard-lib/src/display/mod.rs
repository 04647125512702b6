//! Terminal display system
//!
//! Semantic APIs for user-facing communication. Logging goes through
//! `tracing`; everything a user is meant to read goes through here.

pub mod live;
pub mod mock;
pub mod providers;
pub mod status;
pub mod styling;

// Re-export provider traits and implementations for easy access
pub use live::LiveDisplayProvider;
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{DisplayProvider, StatusProvider};
pub use styling::StyleManager;
