//! Shared core for the cinema catalog browser: entry model, filtering and
//! pagination, playability classification, loading and configuration.

pub mod catalog;
pub mod config;
pub mod entry;
pub mod loader;
pub mod platform;
pub mod playback;

pub use catalog::{CatalogViewModel, IndexedEntry, Page, ViewState};
pub use entry::{Entry, EntryId};
pub use loader::{load_entries, CatalogSource, LoadError};
pub use playback::{classify_playability, MediaHint, Playability};
