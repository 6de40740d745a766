//! # UserList Component
//!
//! Scrollable list of search results. The expanded user gets its repository
//! panel rendered directly underneath its row.
//!
//! ## Architecture
//!
//! `UserList` is a transient component (created each frame) that wraps
//! `&'a mut UserListState` (persistent state) and the users / repo panel
//! (props). Each user becomes a block of pre-wrapped lines. While rendering,
//! every content line records which [`Row`] it belongs to; that map is reused
//! for mouse hit testing and for keeping the highlighted row on screen.
//!
//! Rows that can be highlighted are user headers and, inside the expanded
//! panel, repository name lines. Descriptions and loading/empty text are not.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::policy;
use crate::core::state::RepoPanel;
use crate::github::{RepositorySummary, UserSummary};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Indent of the repository panel under a user row
const PANEL_INDENT: &str = "    ";
/// Extra indent of a description under its repository name
const DESCRIPTION_INDENT: &str = "      ";

/// A highlightable row of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Header of `users[i]`
    User(usize),
    /// `repos[j]` of the expanded user
    Repo(usize),
}

/// Highlightable rows in display order: every user header, with the expanded
/// user's `repo_count` repositories right after it.
pub fn selectable_rows(users: &[UserSummary], expanded: Option<u64>, repo_count: usize) -> Vec<Row> {
    let mut rows = Vec::with_capacity(users.len() + repo_count);
    for (i, user) in users.iter().enumerate() {
        rows.push(Row::User(i));
        if expanded == Some(user.id) {
            rows.extend((0..repo_count).map(Row::Repo));
        }
    }
    rows
}

/// Scroll and layout state for the user list.
/// Must be persisted in the parent TuiState.
pub struct UserListState {
    pub scroll_state: ScrollViewState,
    /// Row under keyboard focus
    pub highlighted: Option<Row>,
    /// Row owning each content line, from the last render
    pub line_rows: Vec<Option<Row>>,
    /// Screen area of the last render (for hit testing)
    pub viewport: Rect,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            highlighted: None,
            line_rows: Vec::new(),
            viewport: Rect::default(),
        }
    }

    /// Forget highlight and scroll position (new result set).
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.highlighted = None;
        self.line_rows.clear();
    }

    /// Move the highlight by `delta` positions within `rows`, clamped to its
    /// ends. A highlight that is no longer in `rows` restarts at the top.
    pub fn move_highlight(&mut self, delta: isize, rows: &[Row]) {
        if rows.is_empty() {
            self.highlighted = None;
            return;
        }
        let current = self
            .highlighted
            .and_then(|h| rows.iter().position(|r| *r == h));
        let next = match current {
            None => 0,
            Some(i) => (i as isize + delta).clamp(0, rows.len() as isize - 1) as usize,
        };
        self.highlighted = Some(rows[next]);
        self.scroll_to_highlighted();
    }

    /// Scroll so the highlighted row's first line is visible.
    pub fn scroll_to_highlighted(&mut self) {
        let Some(row) = self.highlighted else {
            return;
        };
        let Some(line) = self.line_rows.iter().position(|r| *r == Some(row)) else {
            return;
        };
        let top = line as u16;
        let offset_y = self.scroll_state.offset().y;
        let viewport_height = self.viewport.height.max(1);

        if top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if top >= offset_y + viewport_height {
            let new_y = top + 1 - viewport_height;
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Which row is at screen row `screen_y`, if any. Only user headers and
    /// repository name lines are targets.
    pub fn hit_test(&self, screen_y: u16) -> Option<Row> {
        let area = self.viewport;
        if screen_y < area.y || screen_y >= area.y + area.height {
            return None;
        }
        let content_y = (screen_y - area.y) + self.scroll_state.offset().y;
        self.line_rows.get(content_y as usize).copied().flatten()
    }
}

impl EventHandler for UserListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct UserList<'a> {
    pub state: &'a mut UserListState,
    pub users: &'a [UserSummary],
    pub expanded: Option<u64>,
    pub repo_panel: Option<RepoPanel<'a>>,
    /// Draw the highlight (browse mode)
    pub focused: bool,
}

impl<'a> UserList<'a> {
    pub fn new(
        state: &'a mut UserListState,
        users: &'a [UserSummary],
        expanded: Option<u64>,
        repo_panel: Option<RepoPanel<'a>>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            users,
            expanded,
            repo_panel,
            focused,
        }
    }
}

impl Component for UserList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport = area;
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let highlighted = if self.focused {
            self.state.highlighted
        } else {
            None
        };

        let blocks: Vec<UserBlock> = self
            .users
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let panel = if self.expanded == Some(user.id) {
                    self.repo_panel.as_ref()
                } else {
                    None
                };
                user_block(user, i, highlighted, panel, content_width)
            })
            .collect();

        self.state.line_rows = blocks
            .iter()
            .flat_map(|b| b.rows.iter().copied())
            .collect();
        let total_height = self.state.line_rows.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for block in blocks {
            let height = block.lines.len() as u16;
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Paragraph::new(block.lines), rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// One user's lines plus the row each line belongs to (same length).
pub struct UserBlock {
    pub lines: Vec<Line<'static>>,
    pub rows: Vec<Option<Row>>,
}

impl UserBlock {
    fn push(&mut self, line: Line<'static>, row: Option<Row>) {
        self.lines.push(line);
        self.rows.push(row);
    }
}

/// Lines for `users[index]`: the header row, plus the repository panel when
/// `panel` is given (the user is expanded).
pub fn user_block(
    user: &UserSummary,
    index: usize,
    highlighted: Option<Row>,
    panel: Option<&RepoPanel<'_>>,
    width: u16,
) -> UserBlock {
    let marker = if panel.is_some() { "▾ " } else { "▸ " };
    let mut header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    if highlighted == Some(Row::User(index)) {
        header_style = header_style.bg(Color::DarkGray);
    }

    let mut block = UserBlock {
        lines: Vec::new(),
        rows: Vec::new(),
    };
    block.push(
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::LightBlue)),
            Span::styled(user.login.clone(), header_style),
            Span::styled(
                format!("  {}", user.profile_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Some(Row::User(index)),
    );

    let Some(panel) = panel else {
        return block;
    };

    let muted = Style::default().fg(Color::Gray);
    match panel {
        RepoPanel::Loading => block.push(
            Line::from(Span::styled(
                format!("{PANEL_INDENT}Loading repositories..."),
                muted,
            )),
            None,
        ),
        RepoPanel::Empty => block.push(
            Line::from(Span::styled(
                format!("{PANEL_INDENT}{}", policy::NO_REPOSITORIES),
                muted,
            )),
            None,
        ),
        RepoPanel::List(repos) => {
            for (j, repo) in repos.iter().enumerate() {
                let is_highlighted = highlighted == Some(Row::Repo(j));
                for (k, line) in repo_lines(repo, is_highlighted, width).into_iter().enumerate() {
                    block.push(line, (k == 0).then_some(Row::Repo(j)));
                }
            }
        }
    }
    block
}

/// Name and stars on one line; the description, if any, wrapped underneath.
fn repo_lines(repo: &RepositorySummary, is_highlighted: bool, width: u16) -> Vec<Line<'static>> {
    let mut name_style = Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::UNDERLINED);
    if is_highlighted {
        name_style = name_style.bg(Color::DarkGray);
    }
    let mut spans = vec![
        Span::raw(PANEL_INDENT),
        Span::styled(repo.name.clone(), name_style),
        Span::styled(
            format!("  ★ {}", repo.star_count),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if repo.is_fork {
        spans.push(Span::styled("  fork", Style::default().fg(Color::DarkGray)));
    }
    let mut lines = vec![Line::from(spans)];

    if let Some(description) = repo.visible_description() {
        let wrap_width = (width as usize)
            .saturating_sub(DESCRIPTION_INDENT.len())
            .max(1);
        for chunk in textwrap::wrap(description, wrap_width) {
            lines.push(Line::from(Span::styled(
                format!("{DESCRIPTION_INDENT}{chunk}"),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    lines
}
