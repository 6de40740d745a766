use crate::core::state::{App, SearchPanel};
use crate::tui::component::Component;
use crate::tui::components::{Notice, TitleBar, UserList};
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Search box: 1 line of text + 2 for borders
const SEARCH_BOX_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let panel = app.search_panel();
    let mut notice = Notice::new(&panel);
    let notice_height = notice.height(frame.area().width);

    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(1),
        Length(SEARCH_BOX_HEIGHT),
        Length(notice_height),
        Min(0),
        Length(1),
    ]);
    let [title_area, search_area, notice_area, list_area, footer_area] =
        layout.areas(frame.area());

    TitleBar {
        api_host: &tui.api_host,
        searching: app.searching,
        loading_repos: app.loading_repos,
        spinner_frame,
    }
    .render(frame, title_area);

    tui.search_box.searching = app.searching;
    tui.search_box.focused = tui.input_mode == InputMode::Search;
    tui.search_box.render(frame, search_area);

    if !matches!(panel, SearchPanel::Results(_)) {
        notice.render(frame, notice_area);
    }

    if !app.users.is_empty() {
        UserList::new(
            &mut tui.user_list,
            &app.users,
            app.expanded,
            app.repo_panel(),
            tui.input_mode == InputMode::Browse,
        )
        .render(frame, list_area);
    } else {
        tui.user_list.line_rows.clear();
        tui.user_list.viewport = Rect::default();
    }

    frame.render_widget(footer(tui.input_mode), footer_area);
}

fn footer(mode: InputMode) -> Line<'static> {
    let key = Style::default().fg(Color::Gray);
    let text = Style::default().fg(Color::DarkGray);
    let hints: &[(&str, &str)] = match mode {
        InputMode::Search => &[("Enter", "search"), ("Tab/↓", "results"), ("Ctrl+C", "quit")],
        InputMode::Browse => &[
            ("↑↓", "move"),
            ("Enter", "expand / open"),
            ("o", "open in browser"),
            ("/", "search"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::new();
    for (i, (k, t)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", text));
        }
        spans.push(Span::styled(*k, key));
        spans.push(Span::styled(format!(" {t}"), text));
    }
    Line::from(spans)
}
