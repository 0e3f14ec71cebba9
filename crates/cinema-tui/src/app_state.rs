//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for catalog and view state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use cinema_core::config::Config;
use cinema_core::entry::share_link;
use cinema_core::{CatalogViewModel, Entry, IndexedEntry, Page};
use thiserror::Error;

use crate::action::View;
use crate::widgets::status_bar::InputMode;

/// Progress of the one-time catalog load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    /// Persistent for the session; the list stays empty.
    Failed(String),
}

/// Why the watch view has nothing to play.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatchError {
    #[error("no entry id was given")]
    MissingId,
    #[error("entry not found: {0}")]
    NotFound(String),
}

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    pub catalog: CatalogViewModel,
    pub load_status: LoadStatus,
    pub view: View,
    pub input_mode: InputMode,

    // ── Settings ────────────────────────────────────────────────────────────
    pub page_size: usize,
    pub recommendation_limit: usize,
    pub share_base: String,

    /// Index into `catalog.genres()` of the active genre filter.
    pub genre_cursor: Option<usize>,
}

impl AppState {
    pub fn new(config: &Config, page_size: usize) -> Self {
        Self {
            catalog: CatalogViewModel::new(),
            load_status: LoadStatus::Loading,
            view: View::Browse,
            input_mode: InputMode::Normal,
            page_size,
            recommendation_limit: config.catalog.recommendation_limit,
            share_base: config.catalog.share_base.clone(),
            genre_cursor: None,
        }
    }

    pub fn page(&self) -> Page<'_> {
        self.catalog.get_page(self.page_size)
    }

    /// Entry shown in the watch view, if any.
    pub fn watched(&self) -> Option<IndexedEntry<'_>> {
        match self.view {
            View::Watch(index) => self
                .catalog
                .entries()
                .get(index)
                .map(|entry| IndexedEntry { index, entry }),
            _ => None,
        }
    }

    pub fn recommendations(&self) -> Vec<IndexedEntry<'_>> {
        match self.view {
            View::Watch(index) => self
                .catalog
                .recommendations(index, self.recommendation_limit),
            _ => Vec::new(),
        }
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.catalog.entries().get(index)
    }

    pub fn share_link_for(&self, index: usize) -> Option<String> {
        let entry = self.entry(index)?;
        Some(share_link(&self.share_base, &entry.identifier(index)))
    }

    /// Label for the genre picker: the active genre or "all".
    pub fn genre_label(&self) -> &str {
        let genre = &self.catalog.state().genre;
        if genre.is_empty() {
            "all"
        } else {
            genre
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(entries: Vec<Entry>) -> AppState {
        let mut state = AppState::new(&Config::default(), 12);
        state.catalog.replace_entries(entries);
        state.load_status = LoadStatus::Loaded;
        state
    }

    #[test]
    fn test_share_link_uses_position_without_id() {
        let state = state_with(vec![Entry::default(), Entry::default()]);
        assert_eq!(state.share_link_for(1).as_deref(), Some("watch.html?id=1"));
        assert_eq!(state.share_link_for(2), None);
    }

    #[test]
    fn test_watched_and_recommendations() {
        let mut state = state_with(vec![Entry::default(); 5]);
        assert!(state.watched().is_none());
        assert!(state.recommendations().is_empty());

        state.view = View::Watch(3);
        assert_eq!(state.watched().unwrap().index, 3);
        let recs: Vec<_> = state.recommendations().iter().map(|e| e.index).collect();
        assert_eq!(recs, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_genre_label() {
        let mut state = state_with(Vec::new());
        assert_eq!(state.genre_label(), "all");
        state.catalog.set_genre("Drama");
        assert_eq!(state.genre_label(), "Drama");
    }
}
