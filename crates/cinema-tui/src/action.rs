//! Action enum — all user-initiated intents and internal events.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    CatalogList,
    WatchPanel,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Filter ───────────────────────────────────────────────────────────────
    QueryChanged(String),
    NextGenre,
    PrevGenre,
    AllGenres,
    ClearFilters,

    // ── Pagination ───────────────────────────────────────────────────────────
    PrevPage,
    NextPage,

    // ── Watch ────────────────────────────────────────────────────────────────
    /// Open the watch view for an identifier (id or positional index).
    Watch(String),
    /// Play the entry currently shown in the watch view.
    Play,
    /// Open an entry's source URL in the system browser.
    OpenExternal(usize),
    CopyShareLink(usize),
    Back,

    // ── System ───────────────────────────────────────────────────────────────
    SetInputMode(crate::widgets::status_bar::InputMode),
    Quit,
}

/// Which top-level view is active.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Browse,
    /// Watch view for the entry at this original index.
    Watch(usize),
    /// Watch view could not resolve its identifier.
    WatchFailed(crate::app_state::WatchError),
}
