//! Color palette and style constants for the catalog browser.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(0, 8, 20);
pub const C_ACCENT: Color = Color::Rgb(121, 184, 255);
pub const C_PLAYABLE: Color = Color::Rgb(80, 200, 120);
pub const C_EXTERNAL: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(247, 189, 189);
pub const C_MUTED: Color = Color::Rgb(72, 80, 100);
pub const C_SEPARATOR: Color = Color::Rgb(30, 40, 60);
pub const C_SECONDARY: Color = Color::Rgb(188, 223, 248);
pub const C_PRIMARY: Color = Color::Rgb(220, 230, 245);
pub const C_SELECTION_BG: Color = Color::Rgb(20, 36, 60);
pub const C_PANEL_BORDER: Color = Color::Rgb(30, 40, 60);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(121, 184, 255);
pub const C_FILTER_BG: Color = Color::Rgb(10, 20, 36);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_GENRE: Color = Color::Rgb(180, 120, 220);
pub const C_YEAR: Color = Color::Rgb(100, 160, 130);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 130, 160);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR)
}
