//! Status bar — bottom line with mode, page info and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::View;
use crate::theme::{C_ACCENT, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn keys_for(mode: InputMode, view: &View) -> &'static str {
    match (mode, view) {
        (InputMode::Filter, _) => " type to search titles  Enter keep  Esc clear+close",
        (InputMode::Normal, View::Browse) => {
            " ↑↓/jk select  ←→/hl page  Enter watch  / search  g/G genre  a all genres  c clear  y copy link  o open source  q quit"
        }
        (InputMode::Normal, View::Watch(_)) => {
            " Enter/p play  o open source  y copy link  ↑↓ related  w watch related  Esc back  q quit"
        }
        (InputMode::Normal, View::WatchFailed(_)) => " Esc back  q quit",
    }
}

/// Draw the keybindings footer: mode badge, page label, keys.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, view: &View, page_label: &str) {
    let spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", page_label), Style::default().fg(C_ACCENT)),
        Span::styled(keys_for(mode, view), Style::default().fg(C_MUTED)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
