use std::sync::Arc;

use faqchat::core::action::{
    Action, CONNECTION_ERROR_TEXT, Effect, NO_PROPER_RESPONSE_TEXT, reply_action, update,
};
use faqchat::core::state::App;
use faqchat::core::transcript::{Sender, Welcome};
use faqchat::responder::{HttpResponder, Reply, Responder, ResponderError};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

async fn mock_chat(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(response)
        .mount(&mock_server)
        .await;
    mock_server
}

fn reply_body(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn responder_for(server: &MockServer) -> HttpResponder {
    HttpResponder::new(format!("{}/chat", server.uri()))
}

fn app_for(responder: HttpResponder) -> App {
    let endpoint = responder.endpoint().to_string();
    App::new(
        Arc::new(responder),
        Welcome::new("Hello", vec!["How long is it?".to_string()]),
        endpoint,
    )
}

/// Runs one full send cycle through the reducer, awaiting the responder inline.
async fn send_cycle(app: &mut App, text: &str) {
    let Effect::SpawnRequest { ticket, message } = update(app, Action::Submit(text.to_string()))
    else {
        panic!("Submit should start a send cycle");
    };
    assert!(app.is_busy());
    let result = app.responder.send(&message).await;
    update(app, reply_action(ticket, result));
}

// ============================================================================
// HttpResponder
// ============================================================================

#[tokio::test]
async fn test_successful_reply() {
    let server = mock_chat(reply_body(serde_json::json!({"response": "Hi there"}))).await;

    let reply = assert_ok!(responder_for(&server).send("hello").await);
    assert_eq!(reply, Reply::text("Hi there"));
}

#[tokio::test]
async fn test_request_body_and_content_type() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"message": "When is the deadline?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = assert_ok!(responder_for(&mock_server).send("When is the deadline?").await);
    assert_eq!(reply.content(), Some("ok"));
}

#[tokio::test]
async fn test_missing_response_field_is_success_without_content() {
    let server = mock_chat(ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

    let reply = assert_ok!(responder_for(&server).send("hello").await);
    assert_eq!(reply.content(), None);
}

#[tokio::test]
async fn test_server_error_status() {
    let server = mock_chat(ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = assert_err!(responder_for(&server).send("hello").await);
    assert!(matches!(err, ResponderError::Api { status: 500 }));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = mock_chat(ResponseTemplate::new(200).set_body_string("not json at all")).await;

    let err = assert_err!(responder_for(&server).send("hello").await);
    assert!(matches!(err, ResponderError::Parse(_)));
}

#[tokio::test]
async fn test_non_string_response_is_rendered() {
    let server = mock_chat(reply_body(serde_json::json!({"response": 42}))).await;

    let reply = assert_ok!(responder_for(&server).send("hello").await);
    assert_eq!(reply.content(), Some("42"));
}

#[tokio::test]
async fn test_null_body_is_parse_error() {
    let server = mock_chat(ResponseTemplate::new(200).set_body_string("null")).await;

    let err = assert_err!(responder_for(&server).send("hello").await);
    assert!(matches!(err, ResponderError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Bind then release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let responder = HttpResponder::new(format!("http://127.0.0.1:{port}/chat"));

    let err = assert_err!(responder.send("hello").await);
    assert!(matches!(err, ResponderError::Network(_)));
}

// ============================================================================
// Full send cycle through the reducer
// ============================================================================

#[tokio::test]
async fn test_cycle_appends_bot_reply() {
    let server = mock_chat(reply_body(serde_json::json!({"response": "Four weeks."}))).await;
    let mut app = app_for(responder_for(&server));

    send_cycle(&mut app, "How long is it?").await;

    let messages = app.transcript.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender(), Sender::User);
    assert_eq!(messages[1].sender(), Sender::Bot);
    assert_eq!(messages[1].text(), "Four weeks.");
    assert!(!app.is_busy());
}

#[tokio::test]
async fn test_cycle_empty_reply_uses_fallback() {
    let server = mock_chat(reply_body(serde_json::json!({"response": null}))).await;
    let mut app = app_for(responder_for(&server));

    send_cycle(&mut app, "hello").await;

    assert_eq!(app.transcript.last().unwrap().text(), NO_PROPER_RESPONSE_TEXT);
    assert!(!app.is_busy());
}

#[tokio::test]
async fn test_cycle_non_object_bodies_use_fallback() {
    for body in [serde_json::json!([]), serde_json::json!("hello"), serde_json::json!(42)] {
        let server = mock_chat(reply_body(body.clone())).await;
        let mut app = app_for(responder_for(&server));

        send_cycle(&mut app, "hello").await;

        let last = app.transcript.last().unwrap();
        assert_eq!(last.sender(), Sender::Bot, "body {body}");
        assert_eq!(last.text(), NO_PROPER_RESPONSE_TEXT, "body {body}");
        assert!(!app.is_busy());
    }
}

#[tokio::test]
async fn test_cycle_numeric_response_is_shown() {
    let server = mock_chat(reply_body(serde_json::json!({"response": 42}))).await;
    let mut app = app_for(responder_for(&server));

    send_cycle(&mut app, "hello").await;

    assert_eq!(app.transcript.last().unwrap().text(), "42");
}

#[tokio::test]
async fn test_cycle_server_error_shows_connection_message() {
    let server = mock_chat(ResponseTemplate::new(503)).await;
    let mut app = app_for(responder_for(&server));

    send_cycle(&mut app, "hello").await;

    let last = app.transcript.last().unwrap();
    assert_eq!(last.sender(), Sender::Bot);
    assert_eq!(last.text(), CONNECTION_ERROR_TEXT);
    assert!(!app.is_busy());
}

#[tokio::test]
async fn test_reply_after_clear_is_dropped() {
    let server = mock_chat(reply_body(serde_json::json!({"response": "late"}))).await;
    let mut app = app_for(responder_for(&server));

    let Effect::SpawnRequest { ticket, message } = update(&mut app, Action::Submit("hi".into()))
    else {
        panic!("Submit should start a send cycle");
    };
    update(&mut app, Action::Clear);

    let result = app.responder.send(&message).await;
    update(&mut app, reply_action(ticket, result));

    assert!(app.transcript.is_empty());
    assert!(!app.is_busy());
}
