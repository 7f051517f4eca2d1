//! # FAQ Backend
//!
//! The peer the chat client talks to: a single JSON endpoint, `POST /chat`,
//! answered by [`FaqBook`] keyword matching. Runs under `faqchat serve`.

pub mod faq;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use log::{debug, info, warn};
use tokio::net::TcpListener;

pub use faq::{FaqBook, FaqEntry, FaqError};

use crate::responder::{ChatRequest, Reply};

pub const INVALID_REQUEST_TEXT: &str = "Invalid request. Please send a message.";

/// Create the axum router with the single chat endpoint.
pub fn router(book: FaqBook) -> Router {
    Router::new()
        .route("/chat", post(handle_chat))
        .with_state(Arc::new(book))
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: &str, book: FaqBook) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, book).await
}

/// Serve on an already bound listener (port 0 in tests).
pub async fn serve_listener(listener: TcpListener, book: FaqBook) -> std::io::Result<()> {
    info!(
        "FAQ backend listening on {} ({} entries)",
        listener.local_addr()?,
        book.len()
    );
    axum::serve(listener, router(book))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                warn!("Could not install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
            info!("Shutdown requested");
        })
        .await
}

async fn handle_chat(State(book): State<Arc<FaqBook>>, body: Bytes) -> (StatusCode, Json<Reply>) {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected chat request: {}", e);
            return (StatusCode::BAD_REQUEST, Json(Reply::text(INVALID_REQUEST_TEXT)));
        }
    };

    let answer = book.find_best_answer(&request.message);
    info!(
        "Answered message (len={}) with {} bytes",
        request.message.len(),
        answer.len()
    );
    (StatusCode::OK, Json(Reply::text(answer)))
}
