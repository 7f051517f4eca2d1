pub mod http;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use http::HttpResponder;

/// Errors that can occur while asking the remote responder.
/// The variants only feed the diagnostic log; callers treat them all alike.
#[derive(Debug)]
pub enum ResponderError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Endpoint answered with a non-success status.
    Api { status: u16 },
    /// Body was not JSON, or was a bare `null`.
    Parse(String),
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponderError::Network(msg) => write!(f, "network error: {msg}"),
            ResponderError::Api { status } => write!(f, "server error (HTTP {status})"),
            ResponderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ResponderError {}

/// Request body sent to the chat endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Decoded success body. `response` may be missing or null.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Reply {
    #[serde(default)]
    pub response: Option<String>,
}

impl Reply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// Reads a decoded reply body.
    ///
    /// Any JSON value is accepted except a bare `null`. The `response` field
    /// is taken as-is when it is a string, rendered as JSON when it is some
    /// other truthy value, and dropped when it is absent, `null`, `false`,
    /// zero or empty.
    pub fn from_value(body: &serde_json::Value) -> Result<Self, ResponderError> {
        if body.is_null() {
            return Err(ResponderError::Parse("reply body is null".to_string()));
        }
        let response = match body.get("response") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(other) => Some(other.to_string()),
        };
        Ok(Self { response })
    }

    /// The reply text, if the server actually said something.
    pub fn content(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}

#[async_trait]
pub trait Responder: Send + Sync {
    /// Returns the name of the responder, for logs.
    fn name(&self) -> &str;

    /// Delivers one message and waits for the reply. Runs exactly once: no retries.
    async fn send(&self, message: &str) -> Result<Reply, ResponderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_missing_field_decodes_to_none() {
        let reply: Reply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.response, None);
        assert_eq!(reply.content(), None);
    }

    #[test]
    fn test_reply_null_field_decodes_to_none() {
        let reply: Reply = serde_json::from_str(r#"{"response": null}"#).unwrap();
        assert_eq!(reply.response, None);
    }

    #[test]
    fn test_reply_ignores_extra_fields() {
        let reply: Reply =
            serde_json::from_str(r#"{"response": "Hi there", "score": 3}"#).unwrap();
        assert_eq!(reply.content(), Some("Hi there"));
    }

    #[test]
    fn test_reply_empty_text_has_no_content() {
        assert_eq!(Reply::text("").content(), None);
    }

    fn read(body: &str) -> Result<Reply, ResponderError> {
        Reply::from_value(&serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_from_value_non_object_bodies_have_no_content() {
        for body in ["[]", r#""hello""#, "42", "true"] {
            let reply = read(body).unwrap();
            assert_eq!(reply.content(), None, "body {body}");
        }
    }

    #[test]
    fn test_from_value_null_body_is_parse_error() {
        assert!(matches!(read("null"), Err(ResponderError::Parse(_))));
    }

    #[test]
    fn test_from_value_string_response() {
        let reply = read(r#"{"response": "Hi there", "score": 3}"#).unwrap();
        assert_eq!(reply, Reply::text("Hi there"));
    }

    #[test]
    fn test_from_value_truthy_non_string_is_rendered() {
        assert_eq!(read(r#"{"response": 42}"#).unwrap().content(), Some("42"));
        assert_eq!(read(r#"{"response": true}"#).unwrap().content(), Some("true"));
        assert_eq!(
            read(r#"{"response": ["a", 1]}"#).unwrap().content(),
            Some(r#"["a",1]"#)
        );
    }

    #[test]
    fn test_from_value_falsy_response_has_no_content() {
        for body in [
            "{}",
            r#"{"response": null}"#,
            r#"{"response": false}"#,
            r#"{"response": 0}"#,
            r#"{"response": ""}"#,
        ] {
            assert_eq!(read(body).unwrap().content(), None, "body {body}");
        }
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let body = serde_json::to_value(ChatRequest {
            message: "Hello".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Hello" }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ResponderError::Api { status: 500 }.to_string(),
            "server error (HTTP 500)"
        );
        assert!(
            ResponderError::Network("refused".into())
                .to_string()
                .contains("refused")
        );
    }
}
