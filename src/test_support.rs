//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::state::App;
use crate::core::transcript::Welcome;
use crate::responder::{Reply, Responder, ResponderError};

/// A responder that answers every message with the same text and counts calls.
pub struct CannedResponder {
    pub response: Option<String>,
    pub calls: AtomicUsize,
}

impl CannedResponder {
    pub fn new(response: Option<&str>) -> Self {
        Self {
            response: response.map(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Responder for CannedResponder {
    fn name(&self) -> &str {
        "canned"
    }

    async fn send(&self, _message: &str) -> Result<Reply, ResponderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Reply {
            response: self.response.clone(),
        })
    }
}

pub fn test_welcome() -> Welcome {
    Welcome::new(
        "Welcome to the test bot",
        vec!["First question?".to_string(), "Second question?".to_string()],
    )
}

/// Creates a test App backed by a CannedResponder.
pub fn test_app() -> App {
    test_app_with(Arc::new(CannedResponder::new(Some("canned reply"))))
}

pub fn test_app_with(responder: Arc<dyn Responder>) -> App {
    App::new(
        responder,
        test_welcome(),
        "http://localhost:5000/chat".to_string(),
    )
}
