//! # SearchBox Component
//!
//! Single-line text field for the username query.
//!
//! ## Responsibilities
//!
//! - Capture text input and paste (newlines are flattened to spaces)
//! - Handle editing (backspace, delete, cursor movement, Ctrl+U)
//! - Emit `Submit` on Enter
//! - Show a placeholder when empty and "Searching..." while a search runs
//!
//! The buffer is internal state; `searching` and `focused` are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Enter GitHub username...";

/// Left + right border
const HORIZONTAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Enter pressed. Carries the raw, untrimmed buffer.
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    /// A search is in flight (Prop)
    pub searching: bool,
    /// Keyboard focus is on the box (Prop)
    pub focused: bool,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            searching: false,
            focused: true,
        }
    }

    /// Replace the buffer and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = flatten(text);
        self.cursor = self.buffer.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte range of the buffer that fits in `width` columns while keeping
    /// the cursor visible. Scrolls horizontally by dropping leading chars.
    fn visible_start(&self, width: u16) -> usize {
        let width = width as usize;
        let mut start = 0;
        while start < self.cursor && self.buffer[start..self.cursor].width() >= width {
            start = next_char_boundary(&self.buffer, start);
        }
        start
    }

    fn title(&self) -> &'static str {
        if self.searching { " Searching... " } else { " Search " }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());

        let start = self.visible_start(inner_width);
        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(&self.buffer[start..])
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused {
            let column = self.buffer[start..self.cursor].width() as u16;
            let x = area.x + 1 + column.min(inner_width.saturating_sub(1));
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = flatten(text);
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::ClearInput => {
                self.buffer.clear();
                self.cursor = 0;
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

/// Search terms are single-line.
fn flatten(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
