//! Test support shared by unit tests and the end-to-end crate
//!
//! - Isolated temporary project directories with automatic cleanup
//! - Writers for the files the guard reads: manifest and graph export

pub mod filesystem;

pub use filesystem::{GraphExportBuilder, TempDirFixture};
