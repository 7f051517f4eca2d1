//! faqchat library exports: the chat core, the responder client, the
//! terminal UI and the FAQ backend.

pub mod core;
pub mod responder;
pub mod server;
pub mod tui;

#[cfg(test)]
pub mod test_support;
