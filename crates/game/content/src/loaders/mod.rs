//! Content loaders for reading duel data from files.
//!
//! Every loader has a `load(path)` entry point and a `parse(text)` variant
//! used for the bundled defaults.

pub mod config;
pub mod factory;
pub mod moves;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use moves::MoveCatalogLoader;
pub use roster::RosterLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
