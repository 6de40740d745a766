//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (search or repo fetch in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on input, resize, or a
//!   completed request.
//!
//! ## Requests
//!
//! Every `Effect` that needs the network is run on a tokio task; its
//! completion comes back over an `mpsc` channel and is fed to `update()` on
//! the UI thread. After the loop exits the receiver is gone, so late
//! completions are logged and discarded instead of touching any state.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, is_stale, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::task;
use crate::github::{GithubApi, GithubClient};
use crate::tui::component::EventHandler;
use crate::tui::components::title_bar::host_of;
use crate::tui::components::{Row, SearchBox, SearchEvent, UserListState, selectable_rows};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing edits the query. Tab, Down or Esc move to the results.
    Search,
    /// Arrow keys move through the results. Typing jumps back to Search.
    Browse,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub user_list: UserListState,
    pub input_mode: InputMode,
    /// Host shown in the title bar
    pub api_host: String,
}

impl TuiState {
    pub fn new(api_host: &str) -> Self {
        Self {
            search_box: SearchBox::new(),
            user_list: UserListState::new(),
            input_mode: InputMode::Search, // User expects to type immediately
            api_host: api_host.to_string(),
        }
    }

    fn enter_browse(&mut self, app: &App) {
        if app.users.is_empty() {
            return;
        }
        self.input_mode = InputMode::Browse;
        if self.user_list.highlighted.is_none() {
            self.user_list.move_highlight(0, &browse_rows(app));
        }
    }
}

/// What the event loop has to do after an input event.
#[derive(Debug, PartialEq)]
enum Command {
    Run(Effect),
    /// Hand a profile or repository page to the system opener.
    OpenUrl(String),
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the GitHub client from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> Arc<dyn GithubApi> {
    Arc::new(
        GithubClient::new(Some(config.base_url.clone()))
            .with_user_agent(config.user_agent.clone())
            .with_page_sizes(config.search_page_size, config.repo_page_size),
    )
}

pub fn run(config: ResolvedConfig, initial_query: Option<String>) -> std::io::Result<()> {
    let api = build_api(&config);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(host_of(&config.base_url));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(query) = initial_query {
        tui.search_box.set_text(&query);
        let effect = update(&mut app, Action::SubmitSearch(query));
        spawn_effect(api.clone(), effect, tx.clone());
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.searching || app.loading_repos;
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_tui_event(&mut app, &mut tui, event) {
                Some(Command::Run(Effect::Quit)) => should_quit = true,
                Some(Command::Run(effect)) => spawn_effect(api.clone(), effect, tx.clone()),
                Some(Command::OpenUrl(url)) => {
                    info!("Opening {}", url);
                    if let Err(e) = open::that(&url) {
                        warn!("Failed to open {}: {}", url, e);
                    }
                }
                None => {}
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Completed requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = apply_completion(&mut app, &mut tui, action);
            spawn_effect(api.clone(), effect, tx.clone());
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Feed a completed request to `update()`. A search result that is actually
/// applied replaces the list, so the highlight and scroll start over.
fn apply_completion(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let new_results = matches!(action, Action::UsersLoaded { .. }) && !is_stale(app, &action);
    let effect = update(app, action);
    if new_results {
        tui.user_list.reset();
        if app.users.is_empty() {
            tui.input_mode = InputMode::Search;
        }
    }
    effect
}

/// Rows the browse highlight can land on.
fn browse_rows(app: &App) -> Vec<Row> {
    selectable_rows(&app.users, app.expanded, app.repos.len())
}

/// Route one input event. Mouse and scroll events work in both modes; keys
/// depend on `tui.input_mode`.
fn handle_tui_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Command> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Command::Run(update(app, Action::Quit))),
        TuiEvent::MouseClick(_col, row) => {
            let hit = tui.user_list.hit_test(row)?;
            tui.input_mode = InputMode::Browse;
            tui.user_list.highlighted = Some(hit);
            return activate(app, hit);
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.user_list.handle_event(&event);
            return None;
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Search => match event {
            TuiEvent::Tab | TuiEvent::CursorDown | TuiEvent::Escape => {
                tui.enter_browse(app);
                None
            }
            _ => match tui.search_box.handle_event(&event)? {
                SearchEvent::Submit(text) => {
                    Some(Command::Run(update(app, Action::SubmitSearch(text))))
                }
                SearchEvent::ContentChanged => None,
            },
        },
        InputMode::Browse => match event {
            TuiEvent::CursorUp if tui.user_list.highlighted == Some(Row::User(0)) => {
                tui.input_mode = InputMode::Search;
                None
            }
            TuiEvent::CursorUp => {
                tui.user_list.move_highlight(-1, &browse_rows(app));
                None
            }
            TuiEvent::CursorDown => {
                tui.user_list.move_highlight(1, &browse_rows(app));
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => activate(app, tui.user_list.highlighted?),
            TuiEvent::InputChar('o') => {
                let url = match tui.user_list.highlighted? {
                    Row::User(i) => &app.users.get(i)?.profile_url,
                    Row::Repo(j) => &app.repos.get(j)?.html_url,
                };
                Some(Command::OpenUrl(url.clone()))
            }
            TuiEvent::InputChar('q') => Some(Command::Run(update(app, Action::Quit))),
            TuiEvent::InputChar('/') | TuiEvent::Tab | TuiEvent::Escape => {
                tui.input_mode = InputMode::Search;
                None
            }
            // Typing auto-switches to Search mode and forwards the event
            TuiEvent::InputChar(_)
            | TuiEvent::Paste(_)
            | TuiEvent::Backspace
            | TuiEvent::ClearInput => {
                tui.input_mode = InputMode::Search;
                tui.search_box.handle_event(&event);
                None
            }
            _ => None,
        },
    }
}

/// Enter / click on a row: a user header toggles its repositories, a
/// repository opens its page.
fn activate(app: &mut App, row: Row) -> Option<Command> {
    match row {
        Row::User(i) => {
            let user = app.users.get(i)?.clone();
            Some(Command::Run(update(app, Action::ToggleUser(user))))
        }
        Row::Repo(j) => Some(Command::OpenUrl(app.repos.get(j)?.html_url.clone())),
    }
}

/// Run a network effect on a tokio task and send its completion back.
fn spawn_effect(api: Arc<dyn GithubApi>, effect: Effect, tx: mpsc::Sender<Action>) {
    if matches!(effect, Effect::None | Effect::Quit) {
        return;
    }
    info!("Spawning request: {:?}", effect);
    tokio::spawn(async move {
        if let Some(action) = task::perform(api, effect).await
            && tx.send(action).is_err()
        {
            warn!("Dropping completed request: receiver dropped");
        }
    });
}
