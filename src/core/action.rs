//! # Actions
//!
//! Everything that can happen in faqchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Server answers? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the adapter to carry out.
//! No I/O happens here: the network call is an `Effect::SpawnRequest`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! One send cycle:
//!
//! ```text
//! Idle ─Submit─▶ Validate ─▶ Echo (user message) ─▶ Pending ─ReplyReceived/ReplyFailed─▶ Idle
//! ```

use chrono::Local;
use log::{debug, info, warn};

use crate::core::state::{App, READY_STATUS, Ticket};
use crate::core::transcript::Message;
use crate::responder::{Reply, ResponderError};

/// Shown when the server answered but said nothing usable.
pub const NO_PROPER_RESPONSE_TEXT: &str =
    "I received your message but didn't get a proper response from the server.";

/// Shown when the server could not be reached or answered with garbage.
pub const CONNECTION_ERROR_TEXT: &str =
    "I'm having trouble connecting to the server. Please make sure the backend is running.";

pub const AWAITING_STATUS: &str = "Waiting for a reply...";
pub const STILL_AWAITING_STATUS: &str = "Still waiting for the previous reply";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw input box contents.
    Submit(String),
    ReplyReceived { ticket: Ticket, reply: Reply },
    ReplyFailed { ticket: Ticket },
    Clear,
    ToggleWelcome,
    Quit,
}

/// Side effects requested by `update` for the adapter to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send `message` to the responder; the outcome comes back tagged with `ticket`.
    SpawnRequest { ticket: Ticket, message: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let message = text.trim();
            if message.is_empty() {
                return Effect::None;
            }
            if let Some(pending) = app.pending {
                debug!("Submit ignored: ticket {} still pending", pending);
                app.status_message = STILL_AWAITING_STATUS.to_string();
                return Effect::None;
            }

            app.transcript.append(Message::user(message, Local::now()));

            let ticket = app.issue_ticket();
            app.pending = Some(ticket);
            app.status_message = AWAITING_STATUS.to_string();
            info!("Send cycle {} started (len={})", ticket, message.len());

            Effect::SpawnRequest {
                ticket,
                message: message.to_string(),
            }
        }
        Action::ReplyReceived { ticket, reply } => {
            if !settle(app, ticket) {
                return Effect::None;
            }
            let text = match reply.content() {
                Some(text) => text.to_string(),
                None => {
                    info!("Reply {} had no response text, using fallback", ticket);
                    NO_PROPER_RESPONSE_TEXT.to_string()
                }
            };
            app.transcript.append(Message::bot(text, Local::now()));
            Effect::None
        }
        Action::ReplyFailed { ticket } => {
            if !settle(app, ticket) {
                return Effect::None;
            }
            app.transcript.append(Message::bot(CONNECTION_ERROR_TEXT, Local::now()));
            Effect::None
        }
        Action::Clear => {
            if let Some(pending) = app.pending.take() {
                info!("Clear abandons pending ticket {}", pending);
            }
            app.transcript.clear();
            app.status_message = READY_STATUS.to_string();
            Effect::None
        }
        Action::ToggleWelcome => {
            app.transcript.toggle_welcome();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Closes the pending cycle for `ticket`. Returns false for stale tickets.
fn settle(app: &mut App, ticket: Ticket) -> bool {
    if app.pending != Some(ticket) {
        debug!(
            "Dropping stale reply for ticket {} (pending={:?})",
            ticket, app.pending
        );
        return false;
    }
    app.pending = None;
    app.status_message = READY_STATUS.to_string();
    true
}

/// Converts the responder's result into the action the reducer consumes.
///
/// This is where failures stop being errors: every `ResponderError` becomes
/// `ReplyFailed`, with the detail kept only in the log.
pub fn reply_action(ticket: Ticket, result: Result<Reply, ResponderError>) -> Action {
    match result {
        Ok(reply) => Action::ReplyReceived { ticket, reply },
        Err(e) => {
            warn!("Send cycle {} failed: {}", ticket, e);
            Action::ReplyFailed { ticket }
        }
    }
}
