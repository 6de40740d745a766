//! # Notice Component
//!
//! The message area between the search box and the results: error (plus the
//! rate-limit note), "not found", "searching", or the idle prompt.
//! Renders nothing when results are on screen and no error is active.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::policy;
use crate::core::state::SearchPanel;
use crate::tui::component::Component;

/// Most lines the notice may take, so the results keep some room.
const MAX_HEIGHT: u16 = 6;

pub struct Notice<'a> {
    pub panel: &'a SearchPanel<'a>,
}

impl<'a> Notice<'a> {
    pub fn new(panel: &'a SearchPanel<'a>) -> Self {
        Self { panel }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match self.panel {
            SearchPanel::Error {
                message,
                rate_limited,
            } => {
                let mut lines = vec![Line::from(Span::styled(
                    policy::error_line(message),
                    Style::default().fg(Color::Red),
                ))];
                if *rate_limited {
                    lines.push(Line::from(Span::styled(
                        policy::RATE_LIMIT_NOTE,
                        Style::default().fg(Color::Red),
                    )));
                }
                lines
            }
            SearchPanel::NotFound(message) => vec![Line::from(Span::styled(
                message.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))],
            SearchPanel::Searching => vec![Line::from(Span::styled(
                "Searching...",
                Style::default().fg(Color::Gray),
            ))],
            SearchPanel::Idle => vec![Line::from(Span::styled(
                policy::IDLE_PROMPT,
                Style::default().fg(Color::Gray),
            ))],
            SearchPanel::Results(_) => Vec::new(),
        }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    /// Rows needed at `width`, clamped to a small maximum. 0 when empty.
    pub fn height(&self, width: u16) -> u16 {
        if matches!(self.panel, SearchPanel::Results(_)) {
            return 0;
        }
        (self.paragraph().line_count(width) as u16).clamp(1, MAX_HEIGHT)
    }
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(self.paragraph(), area);
    }
}
