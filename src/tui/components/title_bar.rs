//! # TitleBar Component
//!
//! Top line: application name, what is in flight, and which API host we talk to.
//!
//! Stateless. The text changes with the props:
//!
//! 1. **Searching**: `"GitHub Repositories Explorer | ⠋ Searching... | api.github.com"`
//! 2. **Loading repos**: `"GitHub Repositories Explorer | ⠋ Loading repositories... | api.github.com"`
//! 3. **Idle**: `"GitHub Repositories Explorer | api.github.com"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const APP_TITLE: &str = "GitHub Repositories Explorer";

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar<'a> {
    pub api_host: &'a str,
    pub searching: bool,
    pub loading_repos: bool,
    pub spinner_frame: usize,
}

impl TitleBar<'_> {
    fn activity(&self) -> Option<&'static str> {
        if self.searching {
            Some("Searching...")
        } else if self.loading_repos {
            Some("Loading repositories...")
        } else {
            None
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(activity) = self.activity() {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(separator.clone());
            spans.push(Span::styled(
                format!("{spinner} {activity}"),
                Style::default().fg(Color::Yellow),
            ));
        }

        spans.push(separator);
        spans.push(Span::styled(
            self.api_host.to_string(),
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Line::from(spans), area);
    }
}

/// `https://api.github.com/` → `api.github.com`
pub fn host_of(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}
