//! # Application State
//!
//! Core business state for faqchat. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── responder: Arc<dyn Responder>  // remote chat endpoint
//! ├── transcript: Transcript         // welcome + messages
//! ├── pending: Option<Ticket>        // reply in flight (busy indicator)
//! ├── next_ticket: Ticket            // next send cycle id
//! ├── status_message: String         // status bar text
//! └── endpoint: String               // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::transcript::{Transcript, Welcome};
use crate::responder::Responder;

/// Identifies one send cycle. Replies carrying an old ticket are stale.
pub type Ticket = u64;

pub const READY_STATUS: &str = "Ready";

pub struct App {
    pub responder: Arc<dyn Responder>,
    pub transcript: Transcript,
    pub pending: Option<Ticket>,
    pub next_ticket: Ticket,
    pub status_message: String,
    pub endpoint: String,
}

impl App {
    pub fn new(responder: Arc<dyn Responder>, welcome: Welcome, endpoint: String) -> Self {
        Self {
            responder,
            transcript: Transcript::new(welcome),
            pending: None,
            next_ticket: 1,
            status_message: String::from(READY_STATUS),
            endpoint,
        }
    }

    pub fn from_config(responder: Arc<dyn Responder>, config: &ResolvedConfig) -> Self {
        Self::new(
            responder,
            Welcome::new(config.welcome_text.clone(), config.suggestions.clone()),
            config.endpoint.clone(),
        )
    }

    /// True while a reply is awaited.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the next ticket.
    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }
}
