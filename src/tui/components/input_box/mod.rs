//! # InputBox Component
//!
//! The question entry field.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Shift+Enter newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit a submission on Enter
//! - Show whether a reply is outstanding
//!
//! ## State Management
//!
//! The buffer and cursor are internal state; `busy` is a prop from the
//! application state. Submitting does **not** clear the buffer: the parent
//! calls [`InputBox::clear`] once the core has accepted the message, so a
//! rejected submission keeps what the user typed.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_cell,
    inner_width, line_count, next_char_boundary, prev_char_boundary, visual_lines,
};

const PLACEHOLDER: &str = "Type your question here...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with the current buffer
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible row when the text is taller than the box
    scroll_offset: u16,
    /// Prop: a reply is outstanding
    pub busy: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            busy: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer and put the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// Height for the current buffer, between one and `MAX_VISIBLE_LINES` rows.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = line_count(&self.buffer, inner_width(area_width));
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> &'static str {
        if self.busy {
            "Ask (waiting for a reply...)"
        } else {
            "Ask (Enter to send, Shift+Enter for a new line)"
        }
    }

    /// Keep the cursor row inside the visible window.
    fn follow_cursor(&mut self, width: u16) {
        let (row, _) = cursor_cell(&self.buffer, self.cursor, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
        let total = line_count(&self.buffer, width);
        self.scroll_offset = self
            .scroll_offset
            .min(total.saturating_sub(MAX_VISIBLE_LINES));
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.follow_cursor(width);

        let border_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title())
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let lines = visual_lines(&self.buffer, width);
            let start = (self.scroll_offset as usize).min(lines.len());
            let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
            Paragraph::new(lines[start..end].join("\n")).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(paragraph.block(block), area);

        let total = line_count(&self.buffer, width);
        if total > MAX_VISIBLE_LINES {
            let mut state = ScrollbarState::default()
                .content_length(total.saturating_sub(MAX_VISIBLE_LINES) as usize)
                .position(self.scroll_offset as usize);
            let bar = Rect {
                x: area.right().saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                bar,
                &mut state,
            );
        }

        let (row, col) = cursor_cell(&self.buffer, self.cursor, width);
        frame.set_cursor_position((
            area.x + CONTENT_OFFSET_X + col,
            area.y + CONTENT_OFFSET_Y + row.saturating_sub(self.scroll_offset),
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor + i);
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
