//! CatalogList component — the browse view: search bar, genre line and the
//! current page of entries.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use cinema_core::{classify_playability, IndexedEntry, Playability};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, LoadStatus},
    component::Component,
    theme::{
        style_error, style_muted, style_secondary, style_selected_focused, C_EXTERNAL, C_GENRE,
        C_PLAYABLE, C_PRIMARY, C_YEAR,
    },
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
        status_bar::InputMode,
    },
};

pub struct CatalogList {
    pub filter_input: FilterInput,
    /// Row within the current page.
    selected: usize,
    list_state: ListState,
}

impl CatalogList {
    pub fn new() -> Self {
        Self {
            filter_input: FilterInput::new("search titles…"),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Original index of the highlighted entry on the current page.
    pub fn selected_index(&self, state: &AppState) -> Option<usize> {
        state.page().items.get(self.selected).map(|item| item.index)
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl Default for CatalogList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CatalogList {
    fn id(&self) -> ComponentId {
        ComponentId::CatalogList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if self.filter_input.is_active() {
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => vec![Action::QueryChanged(q)],
                FilterAction::Confirmed | FilterAction::Cancelled => {
                    vec![Action::SetInputMode(InputMode::Normal)]
                }
            };
        }

        let page = state.page();
        let len = page.items.len();
        let selected = page.items.get(self.selected).map(|item| item.index);

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            (KeyCode::Char('/'), _) => {
                self.filter_input.activate();
                vec![Action::SetInputMode(InputMode::Filter)]
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
                vec![]
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                vec![]
            }
            (KeyCode::Left | KeyCode::Char('h'), _) if page.has_previous => vec![Action::PrevPage],
            (KeyCode::Right | KeyCode::Char('l'), _) if page.has_next => vec![Action::NextPage],
            (KeyCode::Char('g'), _) => vec![Action::NextGenre],
            (KeyCode::Char('G'), _) => vec![Action::PrevGenre],
            (KeyCode::Char('a'), _) => vec![Action::AllGenres],
            (KeyCode::Char('c'), _) => vec![Action::ClearFilters],
            (KeyCode::Enter, _) => page
                .items
                .get(self.selected)
                .map(|item| vec![Action::Watch(item.identifier())])
                .unwrap_or_default(),
            (KeyCode::Char('y'), _) => selected.map(Action::CopyShareLink).into_iter().collect(),
            (KeyCode::Char('o'), _) => selected.map(Action::OpenExternal).into_iter().collect(),
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) {
        match action {
            Action::QueryChanged(_)
            | Action::NextGenre
            | Action::PrevGenre
            | Action::AllGenres
            | Action::PrevPage
            | Action::NextPage => self.selected = 0,
            Action::ClearFilters => {
                self.filter_input.clear();
                self.selected = 0;
            }
            _ => self.clamp_selection(state.page().items.len()),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(area);

        self.filter_input.draw(frame, chunks[0]);

        let summary = Line::from(vec![
            Span::styled(" genre: ", style_muted()),
            Span::styled(state.genre_label().to_string(), Style::default().fg(C_GENRE)),
            Span::styled(
                format!(
                    "   {} of {} entries",
                    state.catalog.filtered_len(),
                    state.catalog.entries().len()
                ),
                style_muted(),
            ),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[1]);

        let page = state.page();
        let badge_text = page.label();
        let block = pane_chrome(
            "Catalog",
            state.input_mode == InputMode::Normal,
            Some(Badge {
                text: &badge_text,
                color: C_PRIMARY,
            }),
        );
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let message = match &state.load_status {
            LoadStatus::Loading => Some(("Loading catalog…".to_string(), style_secondary())),
            LoadStatus::Failed(err) => Some((
                format!("Failed to load the catalog. Make sure the file exists.\n{}", err),
                style_error(),
            )),
            LoadStatus::Loaded if page.is_empty() => Some(("No results.".to_string(), style_secondary())),
            LoadStatus::Loaded => None,
        };
        if let Some((text, style)) = message {
            frame.render_widget(
                Paragraph::new(text).style(style).wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        self.clamp_selection(page.items.len());
        let title_width = (inner.width as usize).saturating_sub(22).max(8);
        let items: Vec<ListItem> = page
            .items
            .iter()
            .map(|item| ListItem::new(entry_row(item, title_width)))
            .collect();

        self.list_state.select(Some(self.selected));
        let list = List::new(items).highlight_style(style_selected_focused());
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}

/// One list row: playability marker, padded title, year, genre.
pub fn entry_row(item: &IndexedEntry<'_>, title_width: usize) -> Line<'static> {
    let entry = item.entry;
    let (marker, color) = match classify_playability(entry.url.as_deref()) {
        Playability::DirectMedia(_) => ("▶ ", C_PLAYABLE),
        Playability::ExternalLink => ("↗ ", C_EXTERNAL),
    };

    let title = if entry.display_title().is_empty() {
        "(untitled)".to_string()
    } else {
        truncate(entry.display_title(), title_width)
    };
    let pad = title_width.saturating_sub(title.width());

    Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(title, Style::default().fg(C_PRIMARY)),
        Span::raw(" ".repeat(pad + 1)),
        Span::styled(
            format!("{:<6}", entry.year.as_deref().unwrap_or("")),
            Style::default().fg(C_YEAR),
        ),
        Span::styled(
            entry.genre.clone().unwrap_or_default(),
            Style::default().fg(C_GENRE),
        ),
    ])
}

/// Truncate to at most `max` display columns, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_core::config::Config;
    use cinema_core::Entry;

    fn loaded_state(n: usize) -> AppState {
        let mut state = AppState::new(&Config::default(), 12);
        let entries = (0..n)
            .map(|i| Entry {
                title: Some(format!("Movie {i}")),
                ..Entry::default()
            })
            .collect();
        state.catalog.replace_entries(entries);
        state.load_status = LoadStatus::Loaded;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_next_page_only_when_available() {
        let state = loaded_state(25);
        let mut list = CatalogList::new();
        assert!(matches!(
            &list.handle_key(key(KeyCode::Right), &state)[..],
            [Action::NextPage]
        ));
        assert!(list.handle_key(key(KeyCode::Left), &state).is_empty());

        let state = loaded_state(5);
        assert!(list.handle_key(key(KeyCode::Right), &state).is_empty());
    }

    #[test]
    fn test_enter_watches_selected_identifier() {
        let state = loaded_state(5);
        let mut list = CatalogList::new();
        list.handle_key(key(KeyCode::Down), &state);
        list.handle_key(key(KeyCode::Down), &state);
        match &list.handle_key(key(KeyCode::Enter), &state)[..] {
            [Action::Watch(id)] => assert_eq!(id, "2"),
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_selection_stops_at_page_end() {
        let state = loaded_state(2);
        let mut list = CatalogList::new();
        for _ in 0..5 {
            list.handle_key(key(KeyCode::Down), &state);
        }
        assert_eq!(list.selected_index(&state), Some(1));
    }

    #[test]
    fn test_filter_mode_routes_text() {
        let state = loaded_state(2);
        let mut list = CatalogList::new();
        assert!(matches!(
            &list.handle_key(key(KeyCode::Char('/')), &state)[..],
            [Action::SetInputMode(InputMode::Filter)]
        ));
        match &list.handle_key(key(KeyCode::Char('q')), &state)[..] {
            [Action::QueryChanged(q)] => assert_eq!(q, "q"),
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Up", 10), "Up");
        assert_eq!(truncate("The Dark Knight", 8), "The Dar…");
    }
}
