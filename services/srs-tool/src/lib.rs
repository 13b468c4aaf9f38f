//! Command implementations for the `srs-tool` binary.
//!
//! Kept in a library so the commands can be exercised without spawning the
//! binary.

pub mod commands;
pub mod config;

pub use commands::{convert, info, load_metadata, project, Space};
pub use config::ToolConfig;
