//! # Transcript
//!
//! The conversation as the user sees it: a permanent welcome entry followed
//! by an append-only list of messages.
//!
//! ```text
//! Transcript
//! ├── welcome: Welcome      // greeting + suggested questions, never removed
//! ├── messages: Vec<Message> // insertion order, grows until clear()
//! └── revision: u64          // bumped on every mutation
//! ```

use chrono::{DateTime, Local};

use crate::core::sanitize::{escape, format_for_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    timestamp: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: format_timestamp(at),
        }
    }

    pub fn user(text: impl Into<String>, at: DateTime<Local>) -> Self {
        Self::new(Sender::User, text, at)
    }

    pub fn bot(text: impl Into<String>, at: DateTime<Local>) -> Self {
        Self::new(Sender::Bot, text, at)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Local wall-clock time the message was created, as `HH:MM`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Safe markup for the view. Bot text additionally gets line-break markers.
    pub fn render_markup(&self) -> String {
        match self.sender {
            Sender::User => escape(&self.text),
            Sender::Bot => format_for_display(&self.text),
        }
    }
}

/// Formats a local time as zero-padded `HH:MM`.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// The greeting shown at the top of every transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub text: String,
    pub suggestions: Vec<String>,
    pub visible: bool,
}

impl Welcome {
    pub fn new(text: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            suggestions,
            visible: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    welcome: Welcome,
    messages: Vec<Message>,
    revision: u64,
}

impl Transcript {
    pub fn new(welcome: Welcome) -> Self {
        Self {
            welcome,
            messages: Vec::new(),
            revision: 0,
        }
    }

    /// Adds a message at the end.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }

    /// Drops every message and brings the welcome entry back into view.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.welcome.visible = true;
        self.revision += 1;
    }

    pub fn set_welcome_visible(&mut self, visible: bool) {
        if self.welcome.visible != visible {
            self.welcome.visible = visible;
            self.revision += 1;
        }
    }

    pub fn toggle_welcome(&mut self) {
        self.set_welcome_visible(!self.welcome.visible);
    }

    pub fn welcome(&self) -> &Welcome {
        &self.welcome
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages, not counting the welcome entry.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Monotonic change counter. Differs whenever the content differs.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
