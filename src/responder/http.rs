//! HTTP responder: one JSON `POST` per message.
//!
//! Request body is `{"message": "..."}`. A successful reply is any 2xx whose
//! body is JSON. The text comes from its `response` field, which may be
//! missing.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{ChatRequest, Reply, Responder, ResponderError};

pub struct HttpResponder {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpResponder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Responder for HttpResponder {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, message: &str) -> Result<Reply, ResponderError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        info!("POST {} (message_len={})", self.endpoint, request.message.len());

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResponderError::Network(e.to_string()))?;

        debug!("Chat endpoint response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Chat endpoint returned HTTP {}", status);
            return Err(ResponderError::Api { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ResponderError::Network(e.to_string()))?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ResponderError::Parse(e.to_string()))?;
        let reply = Reply::from_value(&value)?;

        debug!("Reply decoded (has_response={})", reply.response.is_some());
        Ok(reply)
    }
}
