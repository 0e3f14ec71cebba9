//! WatchPanel component — metadata, playback panel and related entries for
//! one resolved entry.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use cinema_core::{classify_playability, Playability};

use crate::{
    action::{Action, ComponentId, View},
    app_state::{AppState, WatchError},
    component::Component,
    components::catalog_list::entry_row,
    theme::{
        style_error, style_muted, style_secondary, style_selected_focused, C_EXTERNAL, C_PLAYABLE,
        C_PRIMARY,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct WatchPanel {
    /// Row within the related list.
    selected: usize,
    list_state: ListState,
}

impl WatchPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }
}

impl Default for WatchPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// User-facing text for a failed lookup, distinct from load failure.
pub fn watch_error_message(err: &WatchError) -> &'static str {
    match err {
        WatchError::MissingId => "No entry id was given in the link.",
        WatchError::NotFound(_) => "Entry not found.",
    }
}

impl Component for WatchPanel {
    fn id(&self) -> ComponentId {
        ComponentId::WatchPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let current = state.watched().map(|w| w.index);
        let related = state.recommendations();

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            (KeyCode::Esc | KeyCode::Backspace, _) => vec![Action::Back],
            (KeyCode::Enter | KeyCode::Char('p'), _) if current.is_some() => vec![Action::Play],
            (KeyCode::Char('o'), _) => current.map(Action::OpenExternal).into_iter().collect(),
            (KeyCode::Char('y'), _) => current.map(Action::CopyShareLink).into_iter().collect(),
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
                vec![]
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                if self.selected + 1 < related.len() {
                    self.selected += 1;
                }
                vec![]
            }
            (KeyCode::Char('w'), _) => related
                .get(self.selected)
                .map(|item| vec![Action::Watch(item.identifier())])
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) {
        if matches!(action, Action::Watch(_) | Action::Back) {
            self.selected = 0;
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if let View::WatchFailed(err) = &state.view {
            let block = pane_chrome("Watch", true, None);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(watch_error_message(err)).style(style_error()),
                inner,
            );
            return;
        }

        let Some(watched) = state.watched() else {
            return;
        };
        let entry = watched.entry;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(3),
            ])
            .split(area);

        let meta = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                entry.meta_line(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(meta), chunks[0]);

        let url = entry.url.as_deref().unwrap_or("");
        let (badge, lines) = match classify_playability(entry.url.as_deref()) {
            Playability::DirectMedia(hint) => (
                Badge {
                    text: hint.mime_type(),
                    color: C_PLAYABLE,
                },
                vec![
                    Line::from(Span::styled(
                        "▶ Direct media. Press Enter to play.",
                        Style::default().fg(C_PLAYABLE),
                    )),
                    Line::from(Span::styled(url.to_string(), style_muted())),
                ],
            ),
            Playability::ExternalLink => (
                Badge {
                    text: "LINK",
                    color: C_EXTERNAL,
                },
                vec![
                    Line::from(Span::styled(
                        "This source is not a direct video file.",
                        style_secondary(),
                    )),
                    Line::from(Span::styled(
                        "↗ Press o to open the original site.",
                        Style::default().fg(C_EXTERNAL),
                    )),
                    Line::from(Span::styled(url.to_string(), style_muted())),
                ],
            ),
        };
        let block = pane_chrome("Player", true, Some(badge));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            chunks[1],
        );

        let related = state.recommendations();
        self.selected = self.selected.min(related.len().saturating_sub(1));
        let block = pane_chrome("Related", false, None);
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let title_width = (inner.width as usize).saturating_sub(22).max(8);
        let items: Vec<ListItem> = related
            .iter()
            .map(|item| ListItem::new(entry_row(item, title_width)))
            .collect();
        self.list_state
            .select((!related.is_empty()).then_some(self.selected));
        frame.render_stateful_widget(
            List::new(items).highlight_style(style_selected_focused()),
            inner,
            &mut self.list_state,
        );
    }
}
