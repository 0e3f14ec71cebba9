//! App — component-based event loop.
//!
//! - `App` owns the components and `AppState` (read-only to components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input and the one-time catalog load.
//! - The loop draws a frame, then awaits the next message or tick.
//! - Components return `Vec<Action>`; App applies each Action to the state.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use cinema_core::config::Config;
use cinema_core::entry::identifier_from_link;
use cinema_core::{load_entries, CatalogSource, Entry, LoadError};

use crate::{
    action::{Action, View},
    app_state::{AppState, LoadStatus, WatchError},
    component::Component,
    components::{catalog_list::CatalogList, watch_panel::WatchPanel},
    player::{self, Launched},
    theme::{style_muted, C_ACCENT, C_BG},
    widgets::{
        status_bar::{draw_keys_bar, draw_separator},
        toast::ToastManager,
    },
};

/// Everything that can wake the event loop.
pub enum AppMessage {
    Event(Event),
    Loaded(Result<Vec<Entry>, LoadError>),
}

pub struct App {
    pub state: AppState,
    config: Config,
    source: CatalogSource,
    /// Identifier to open once the catalog has loaded (`--watch`).
    pending_watch: Option<String>,
    catalog_list: CatalogList,
    watch_panel: WatchPanel,
    toasts: ToastManager,
    clipboard: Option<arboard::Clipboard>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        source: CatalogSource,
        page_size: usize,
        pending_watch: Option<String>,
    ) -> Self {
        Self {
            state: AppState::new(&config, page_size),
            config,
            source,
            pending_watch,
            catalog_list: CatalogList::new(),
            watch_panel: WatchPanel::new(),
            toasts: ToastManager::new(),
            clipboard: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: one-time catalog load ────────────────────────────
        self.toasts.spinner(format!("Loading {}", self.source));
        let load_tx = tx.clone();
        let source = self.source.clone();
        tokio::spawn(async move {
            let result = load_entries(&source).await;
            let _ = load_tx.send(AppMessage::Loaded(result)).await;
        });

        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        let result = loop {
            if needs_redraw {
                if let Err(e) = terminal.draw(|f| self.draw(f)) {
                    break Err(e.into());
                }
            }
            needs_redraw = false;

            if self.should_quit {
                break Ok(());
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = ui_tick.tick() => {
                    needs_redraw = self.toasts.tick();
                }
            }
        };

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("cinema exiting");

        result
    }

    /// Apply one message. Returns true when a redraw is needed.
    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                let component: &mut dyn Component = match self.state.view {
                    View::Browse => &mut self.catalog_list,
                    View::Watch(_) | View::WatchFailed(_) => &mut self.watch_panel,
                };
                let actions = component.handle_key(key, &self.state);
                trace!("{:?}: {:?} -> {} action(s)", component.id(), key.code, actions.len());
                for action in actions {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Loaded(result) => {
                self.on_loaded(result);
                true
            }
        }
    }

    fn on_loaded(&mut self, result: Result<Vec<Entry>, LoadError>) {
        self.toasts.dismiss_spinner();
        match result {
            Ok(entries) => {
                self.state.catalog.replace_entries(entries);
                self.state.load_status = LoadStatus::Loaded;
                if let Some(link) = self.pending_watch.take() {
                    self.open_watch(&link);
                }
            }
            Err(e) => {
                error!("catalog load failed: {}", e);
                self.state.catalog.replace_entries(Vec::new());
                self.state.load_status = LoadStatus::Failed(e.to_string());
                self.toasts.error("Catalog failed to load");
            }
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch: {:?}", action);
        match &action {
            Action::QueryChanged(q) => self.state.catalog.set_query(q),
            Action::NextGenre => self.cycle_genre(true),
            Action::PrevGenre => self.cycle_genre(false),
            Action::AllGenres => {
                self.state.genre_cursor = None;
                self.state.catalog.set_genre("");
            }
            Action::ClearFilters => {
                self.state.genre_cursor = None;
                self.state.catalog.clear_filters();
            }
            Action::PrevPage => self.state.catalog.go_to_previous_page(),
            Action::NextPage => self.state.catalog.go_to_next_page(),
            Action::Watch(id) => self.open_watch(id),
            Action::Play => self.play_current(),
            Action::OpenExternal(index) => self.open_external(*index),
            Action::CopyShareLink(index) => self.copy_share_link(*index),
            Action::Back => self.state.view = View::Browse,
            Action::SetInputMode(mode) => self.state.input_mode = *mode,
            Action::Quit => self.should_quit = true,
        }
        self.catalog_list.on_action(&action, &self.state);
        self.watch_panel.on_action(&action, &self.state);
    }

    /// Step through `None → genre 0 → … → genre n-1 → None`.
    fn cycle_genre(&mut self, forward: bool) {
        let genres = self.state.catalog.genres();
        if genres.is_empty() {
            return;
        }
        let last = genres.len() - 1;
        let next = match (self.state.genre_cursor, forward) {
            (None, true) => Some(0),
            (Some(i), true) if i < last => Some(i + 1),
            (Some(_), true) => None,
            (None, false) => Some(last),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
        self.state.genre_cursor = next;
        let genre = next.map(|i| genres[i].as_str()).unwrap_or("");
        self.state.catalog.set_genre(genre);
    }

    /// Resolve a bare identifier or share link and switch to the watch view.
    pub fn open_watch(&mut self, link: &str) {
        let Some(id) = identifier_from_link(link) else {
            warn!("watch: no identifier in {:?}", link);
            self.state.view = View::WatchFailed(WatchError::MissingId);
            return;
        };
        self.state.view = match self.state.catalog.resolve_entry(&id) {
            Some(found) => {
                info!("watch: {} -> entry {}", id, found.index);
                View::Watch(found.index)
            }
            None => {
                warn!("watch: {} not found", id);
                View::WatchFailed(WatchError::NotFound(id))
            }
        };
    }

    fn play_current(&mut self) {
        let Some(watched) = self.state.watched() else {
            return;
        };
        match player::play(watched.entry, &self.config.player) {
            Ok(Launched::Player { mime }) => {
                self.toasts.success(format!("Playing in {} ({})", self.config.player.mpv_binary, mime))
            }
            Ok(Launched::Browser) => self.toasts.info("Opened original site"),
            Err(e) => {
                warn!("play failed: {}", e);
                self.toasts.error(e.to_string());
            }
        }
    }

    fn open_external(&mut self, index: usize) {
        let url = self
            .state
            .entry(index)
            .and_then(|e| e.url.clone())
            .unwrap_or_default();
        match player::open_external(&url) {
            Ok(()) => self.toasts.info("Opened in browser"),
            Err(e) => {
                warn!("open failed: {}", e);
                self.toasts.error(e.to_string());
            }
        }
    }

    fn copy_share_link(&mut self, index: usize) {
        let Some(link) = self.state.share_link_for(index) else {
            return;
        };
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => self.clipboard = Some(cb),
                Err(e) => {
                    warn!("clipboard unavailable: {}", e);
                    self.toasts.error("Clipboard unavailable");
                    return;
                }
            }
        }
        if let Some(cb) = self.clipboard.as_mut() {
            match cb.set_text(link.clone()) {
                Ok(()) => self.toasts.success(format!("Copied {}", link)),
                Err(e) => {
                    warn!("clipboard write failed: {}", e);
                    self.toasts.error("Could not copy link");
                }
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled(
                " CINEMA ",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.source.to_string(), style_muted()),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        match self.state.view {
            View::Browse => self.catalog_list.draw(frame, chunks[1], &self.state),
            View::Watch(_) | View::WatchFailed(_) => {
                self.watch_panel.draw(frame, chunks[1], &self.state)
            }
        }

        draw_separator(frame, chunks[2]);
        let page_label = self.state.page().label();
        draw_keys_bar(
            frame,
            chunks[3],
            self.state.input_mode,
            &self.state.view,
            &page_label,
        );

        self.toasts.draw(frame, area);
    }
}
