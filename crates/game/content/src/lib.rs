//! Data-driven duel content and loaders.
//!
//! This crate houses the bundled content and the loaders for RON/TOML data files:
//! - Move catalog (RON)
//! - Character roster (RON)
//! - Narrative templates (RON)
//! - Battle configuration (TOML)
//!
//! Content is consumed through the `battle-core` oracle traits and never
//! appears in battle state.

#[cfg(feature = "loaders")]
pub mod bundled;
#[cfg(feature = "loaders")]
pub mod loaders;
#[cfg(feature = "loaders")]
pub mod narrator;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MoveCatalogLoader, RosterLoader};
#[cfg(feature = "loaders")]
pub use narrator::{NarrativeTemplates, TemplateNarrator};
