// App state and main event loop.
// Manages tabs, the two story surfaces, requests to the feed service, and
// keyboard input handling.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::cache::store;
use crate::service::{FeedEvent, FeedHandle, FeedResponse};
use crate::state::{LoadingState, StoryPanel, Theme};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Feed,
    Board,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Feed => "Feed",
            Tab::Board => "Board",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Feed => Tab::Board,
            Tab::Board => Tab::Console,
            Tab::Console => Tab::Feed,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Feed => Tab::Console,
            Tab::Board => Tab::Feed,
            Tab::Console => Tab::Board,
        }
    }
}

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Warn,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Why a request was issued, so the response lands in the right place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Load,
    Refresh,
}

// The single in-flight request to the feed service.
struct Pending {
    target: Tab,
    kind: RequestKind,
    rx: oneshot::Receiver<FeedResponse>,
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Story surface with compact rows.
    pub feed_panel: StoryPanel,
    /// Story surface with a card grid.
    pub board_panel: StoryPanel,
    /// Console messages (activity log).
    pub console_messages: Vec<ConsoleMessage>,
    /// List state for console scrolling.
    pub console_list_state: ListState,
    /// Number of unread console errors (for badge).
    pub console_unread: usize,
    /// Current theme, persisted on toggle.
    pub theme: Theme,
    /// Whether keystrokes go to the search query.
    pub search_active: bool,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    handle: FeedHandle,
    events: mpsc::UnboundedReceiver<FeedEvent>,
    theme_path: PathBuf,
    pending: Option<Pending>,
}

impl App {
    pub fn new(
        handle: FeedHandle,
        events: mpsc::UnboundedReceiver<FeedEvent>,
        theme: Theme,
        theme_path: PathBuf,
    ) -> Self {
        Self {
            active_tab: Tab::default(),
            feed_panel: StoryPanel::new(),
            board_panel: StoryPanel::new(),
            console_messages: Vec::new(),
            console_list_state: ListState::default(),
            console_unread: 0,
            theme,
            search_active: false,
            show_help: false,
            should_quit: false,
            handle,
            events,
            theme_path,
            pending: None,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_feed_events();
            self.poll_pending();
            self.maybe_load_active();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Whether a request to the feed service is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The story panel shown on `tab`, if it has one.
    pub fn panel(&self, tab: Tab) -> Option<&StoryPanel> {
        match tab {
            Tab::Feed => Some(&self.feed_panel),
            Tab::Board => Some(&self.board_panel),
            Tab::Console => None,
        }
    }

    pub fn active_panel(&self) -> Option<&StoryPanel> {
        self.panel(self.active_tab)
    }

    fn panel_mut(&mut self, tab: Tab) -> Option<&mut StoryPanel> {
        match tab {
            Tab::Feed => Some(&mut self.feed_panel),
            Tab::Board => Some(&mut self.board_panel),
            Tab::Console => None,
        }
    }

    fn active_panel_mut(&mut self) -> Option<&mut StoryPanel> {
        self.panel_mut(self.active_tab)
    }

    // Surface background refresh outcomes in the console log.
    fn drain_feed_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                FeedEvent::Refreshed { count } => {
                    self.log(ConsoleMessage::info(format!(
                        "Background refresh stored {count} stories"
                    )));
                }
                FeedEvent::RefreshFailed(err) => {
                    self.log(ConsoleMessage::error(format!(
                        "Background refresh failed: {err}"
                    )));
                }
            }
        }
    }

    // Check the in-flight request without blocking the draw loop.
    fn poll_pending(&mut self) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        match pending.rx.try_recv() {
            Ok(response) => self.apply_response(pending.target, pending.kind, response),
            Err(TryRecvError::Empty) => self.pending = Some(pending),
            Err(TryRecvError::Closed) => self.apply_response(
                pending.target,
                pending.kind,
                FeedResponse::Failed("feed service went away".to_string()),
            ),
        }
    }

    fn apply_response(&mut self, target: Tab, kind: RequestKind, response: FeedResponse) {
        match (kind, response) {
            (RequestKind::Load, FeedResponse::Stories(stories)) => {
                self.log(ConsoleMessage::info(format!(
                    "Loaded {} stories",
                    stories.len()
                )));
                if let Some(panel) = self.panel_mut(target) {
                    panel.set_loaded(stories, Utc::now());
                }
            }
            (RequestKind::Load, FeedResponse::Failed(err)) => {
                self.log(ConsoleMessage::error(format!(
                    "Loading stories failed: {err}"
                )));
                if let Some(panel) = self.panel_mut(target) {
                    panel.set_error(err);
                }
            }
            (RequestKind::Refresh, FeedResponse::Fetched { count }) => {
                self.log(ConsoleMessage::info(format!("Fetched {count} fresh stories")));
                // Reload the surface with the new batch.
                self.request(target, RequestKind::Load);
            }
            (RequestKind::Refresh, FeedResponse::Failed(err)) => {
                // Keep showing whatever the surface already has.
                self.log(ConsoleMessage::warn(format!("Refresh failed: {err}")));
            }
            (kind, response) => {
                self.log(ConsoleMessage::warn(format!(
                    "Unexpected {response:?} for a {kind:?} request"
                )));
            }
        }
    }

    // Kick off a load for a surface that has never been filled.
    fn maybe_load_active(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let idle = match self.active_panel() {
            Some(panel) => matches!(panel.data, LoadingState::Idle),
            None => false,
        };
        if idle {
            self.request(self.active_tab, RequestKind::Load);
        }
    }

    fn request(&mut self, target: Tab, kind: RequestKind) {
        let sent = match kind {
            RequestKind::Load => self.handle.get_stories(),
            RequestKind::Refresh => self.handle.fetch_now(),
        };
        match sent {
            Ok(rx) => {
                if kind == RequestKind::Load {
                    if let Some(panel) = self.panel_mut(target) {
                        panel.set_loading();
                    }
                }
                self.pending = Some(Pending { target, kind, rx });
            }
            Err(err) => {
                self.log(ConsoleMessage::error(format!("Feed request failed: {err}")));
                if kind == RequestKind::Load {
                    if let Some(panel) = self.panel_mut(target) {
                        panel.set_error(err.to_string());
                    }
                }
            }
        }
    }

    /// Handle keyboard and other events.
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if self.show_help {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                            self.show_help = false;
                        }
                    } else if self.search_active {
                        self.handle_search_key(key.code);
                    } else {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_active = false;
                if let Some(panel) = self.active_panel_mut() {
                    panel.clear_query();
                }
            }
            KeyCode::Enter => self.search_active = false,
            KeyCode::Backspace => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.pop_query();
                }
            }
            KeyCode::Char(c) => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.push_query(c);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.active_tab = self.active_tab.next();
                self.clear_console_badge_if_viewing();
            }
            KeyCode::BackTab => {
                self.active_tab = self.active_tab.prev();
                self.clear_console_badge_if_viewing();
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => {
                if self.active_panel().is_some() {
                    self.search_active = true;
                }
            }
            KeyCode::Char('s') => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.cycle_sort();
                }
            }
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('r') => self.refresh_active(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            _ => {}
        }
    }

    // Manual refresh of the active surface; one request in flight at a time.
    fn refresh_active(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if self.active_panel().is_some() {
            self.request(self.active_tab, RequestKind::Refresh);
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(err) = store::write_theme(&self.theme_path, self.theme) {
            self.log(ConsoleMessage::warn(format!(
                "Could not persist theme: {err}"
            )));
        }
    }

    fn open_selected(&mut self) {
        let Some(story) = self.active_panel().and_then(|panel| panel.selected_story()) else {
            return;
        };
        let link = story.link();
        if let Err(err) = open::that(&link) {
            self.log(ConsoleMessage::warn(format!("Could not open {link}: {err}")));
        }
    }

    fn select_prev(&mut self) {
        match self.active_tab {
            Tab::Console => {
                let i = match self.console_list_state.selected() {
                    Some(i) => i.saturating_sub(1),
                    None => 0,
                };
                if !self.console_messages.is_empty() {
                    self.console_list_state.select(Some(i));
                }
            }
            _ => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.select_prev();
                }
            }
        }
    }

    fn select_next(&mut self) {
        match self.active_tab {
            Tab::Console => {
                let len = self.console_messages.len();
                if len == 0 {
                    return;
                }
                let i = match self.console_list_state.selected() {
                    Some(i) if i + 1 >= len => i,
                    Some(i) => i + 1,
                    None => 0,
                };
                self.console_list_state.select(Some(i));
            }
            _ => {
                if let Some(panel) = self.active_panel_mut() {
                    panel.select_next();
                }
            }
        }
    }

    fn log(&mut self, message: ConsoleMessage) {
        if message.level == ConsoleLevel::Error && self.active_tab != Tab::Console {
            self.console_unread += 1;
        }
        self.console_messages.push(message);
        self.console_list_state
            .select(Some(self.console_messages.len() - 1));
    }

    /// Clear console badge when viewing console tab.
    fn clear_console_badge_if_viewing(&mut self) {
        if self.active_tab == Tab::Console {
            self.console_unread = 0;
        }
    }
}
