//! Component trait — the interface every UI panel implements.
//!
//! - Components own their local UI state (selection, scroll) and render themselves.
//! - Components receive `AppState` (read-only) for catalog data.
//! - Components produce `Vec<Action>`; the App event-loop applies them.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event. Returns actions to be dispatched.
    /// Only called while this component's view is active.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Receive an action after the App applied it.
    fn on_action(&mut self, _action: &Action, _state: &AppState) {}

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
