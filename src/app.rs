//! App state and key handling for the article list screen.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use tokio::runtime::Runtime;

use crate::api::GuardianClient;
use crate::article::ArticleList;
use crate::browser::UrlOpener;
use crate::config::AppConfig;
use crate::connectivity::Connectivity;
use crate::error::{NewsTuiError, Result};
use crate::loader::{LoadOutcome, PendingLoad};
use crate::tui::draw_articles;

const TOAST_DURATION: Duration = Duration::from_millis(3500);

/// Idle is never observable: the load starts in `App::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Populated,
    Empty,
    NoConnectivity,
    /// Description of the fetch or parse failure.
    Failed(String),
}

/// Short-lived status line message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    expires_at: Instant,
}

pub struct App {
    pub config: AppConfig,
    pub state: LoadState,
    pub articles: ArticleList,
    pub selected: usize,
    pub scroll: usize,
    /// Rows that fit in the list area (updated each draw); scroll follows selection.
    pub visible_rows: usize,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    opener: Box<dyn UrlOpener>,
    pending: Option<PendingLoad>,
    /// Taken in `Drop` and shut down without waiting on blocking work.
    runtime: Option<Runtime>,
}

impl App {
    /// Builds the screen and starts its one load.
    pub fn new(
        config: AppConfig,
        client: GuardianClient,
        probe: Arc<dyn Connectivity>,
        opener: Box<dyn UrlOpener>,
    ) -> Result<Self> {
        let runtime = Runtime::new().map_err(|e| NewsTuiError::Config(e.to_string()))?;
        let mut app = Self {
            config,
            state: LoadState::Loading,
            articles: Vec::new(),
            selected: 0,
            scroll: 0,
            visible_rows: 10,
            toast: None,
            should_quit: false,
            opener,
            pending: None,
            runtime: Some(runtime),
        };
        if let Some(runtime) = app.runtime.as_ref() {
            app.pending = Some(PendingLoad::spawn(runtime.handle(), probe, client));
        }
        Ok(app)
    }

    /// Called each tick; applies the load result once it arrives.
    pub fn poll_load(&mut self) {
        if let Some(outcome) = self.pending.as_mut().and_then(PendingLoad::poll) {
            self.apply_outcome(outcome);
        }
        if self.toast.as_ref().is_some_and(|t| Instant::now() >= t.expires_at) {
            self.toast = None;
        }
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) {
        self.pending = None;
        self.selected = 0;
        self.scroll = 0;
        self.articles = Vec::new();
        self.state = match outcome {
            LoadOutcome::Populated(list) => {
                self.articles = list;
                LoadState::Populated
            }
            LoadOutcome::Empty => LoadState::Empty,
            LoadOutcome::NoConnectivity => LoadState::NoConnectivity,
            LoadOutcome::Failed(e) => {
                let message = match &e {
                    NewsTuiError::Parse(msg) => format!("Json parsing error: {msg}"),
                    other => format!("Couldn't get json from server: {other}"),
                };
                self.show_toast(message.clone());
                LoadState::Failed(message)
            }
        };
    }

    fn show_toast(&mut self, message: String) {
        self.toast = Some(Toast {
            message,
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let content_height = (frame.area().height as usize).saturating_sub(5).max(1);
        self.visible_rows = (content_height / 2).max(1);
        if self.selected >= self.scroll + self.visible_rows {
            self.scroll = self.selected + 1 - self.visible_rows;
        } else if self.selected < self.scroll {
            self.scroll = self.selected;
        }
        draw_articles(
            frame,
            &self.config,
            &self.state,
            &self.articles,
            self.selected,
            self.scroll,
            self.toast.as_ref().map(|t| t.message.as_str()),
        );
    }

    /// Ctrl+C/Ctrl+Q quit; releases and repeats are ignored.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q' | 'c'))
        {
            self.should_quit = true;
            return;
        }
        self.handle_key(key.code);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                if self.selected < self.scroll {
                    self.scroll = self.selected;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.articles.len() {
                    self.selected += 1;
                    if self.selected >= self.scroll + self.visible_rows {
                        self.scroll = (self.selected + 1).saturating_sub(self.visible_rows);
                    }
                }
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                self.scroll = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.articles.len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let Some(article) = self.articles.get(self.selected) else {
            return;
        };
        if let Err(e) = self.opener.open(&article.url) {
            tracing::error!(url = %article.url, error = %e, "failed to open link");
            self.show_toast(format!("Could not open link: {e}"));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.pending = None;
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
