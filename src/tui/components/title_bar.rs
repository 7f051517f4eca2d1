//! # TitleBar Component
//!
//! Top status bar: which endpoint the chat talks to, the current status
//! line, and a "↓ New" marker when content arrived below the scroll
//! position.
//!
//! Purely presentational. Everything it shows is passed in as props:
//! - `endpoint`: core `App` state (configuration)
//! - `status_message`: core `App` state (set by `update`)
//! - `has_unseen_content`: TUI state (scroll position)
//!
//! The title text degrades in this order so the most important parts stay
//! visible on narrow terminals:
//!
//! 1. `"faqchat (endpoint: URL) | Ready | ↓ New"`
//! 2. `"faqchat (endpoint: URL) | Ready"`
//! 3. `"faqchat (endpoint: URL)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

const APP_TITLE: &str = "faqchat";

pub struct TitleBar {
    pub endpoint: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            status_message,
            has_unseen_content,
        }
    }

    fn title_text(&self) -> String {
        let base = format!("{} (endpoint: {})", APP_TITLE, self.endpoint);
        if self.has_unseen_content {
            format!("{} | {} | ↓ New", base, self.status_message)
        } else if self.status_message.is_empty() {
            base
        } else {
            format!("{} | {}", base, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.title_text()), area);
    }
}
