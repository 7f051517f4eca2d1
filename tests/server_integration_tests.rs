use faqchat::responder::{HttpResponder, Reply, Responder, ResponderError};
use faqchat::server::faq::{GREETING_ANSWER, OUT_OF_SCOPE_ANSWER};
use faqchat::server::{FaqBook, FaqEntry, INVALID_REQUEST_TEXT, serve_listener};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// Starts the FAQ backend on an ephemeral port and returns its chat URL.
async fn start_server(book: FaqBook) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(listener, book));
    format!("http://{addr}/chat")
}

fn small_book() -> FaqBook {
    FaqBook::new(vec![FaqEntry {
        keywords: vec!["certificate".to_string()],
        answer: "Certificates arrive by email.".to_string(),
    }])
}

#[tokio::test]
async fn test_client_gets_faq_answer() {
    let responder = HttpResponder::new(start_server(small_book()).await);

    let reply = assert_ok!(responder.send("When do I get my certificate?").await);
    assert_eq!(reply.content(), Some("Certificates arrive by email."));
}

#[tokio::test]
async fn test_greeting_wins() {
    let responder = HttpResponder::new(start_server(small_book()).await);

    let reply = assert_ok!(responder.send("Hello, certificate?").await);
    assert_eq!(reply.content(), Some(GREETING_ANSWER));
}

#[tokio::test]
async fn test_unknown_question_is_out_of_scope() {
    let responder = HttpResponder::new(start_server(small_book()).await);

    let reply = assert_ok!(responder.send("What is the capital of France?").await);
    assert_eq!(reply.content(), Some(OUT_OF_SCOPE_ANSWER));
}

#[tokio::test]
async fn test_bundled_book_answers_duration() {
    let book = FaqBook::bundled().unwrap();
    let responder = HttpResponder::new(start_server(book).await);

    let reply = assert_ok!(responder.send("How long is the internship?").await);
    let text = reply.content().unwrap();
    assert!(text.contains("four weeks"), "unexpected answer: {text}");
}

#[tokio::test]
async fn test_invalid_body_is_rejected_with_400() {
    let url = start_server(small_book()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .body(r#"{"text": "wrong field"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let reply: Reply = response.json().await.unwrap();
    assert_eq!(reply.content(), Some(INVALID_REQUEST_TEXT));
}

#[tokio::test]
async fn test_plain_text_body_is_rejected_with_400() {
    let url = start_server(small_book()).await;
    let response = reqwest::Client::new()
        .post(&url)
        .body("plain text")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_unknown_route_is_api_error_for_client() {
    let url = start_server(small_book()).await;
    let responder = HttpResponder::new(url.replace("/chat", "/missing"));

    let err = assert_err!(responder.send("hello").await);
    assert!(matches!(err, ResponderError::Api { status: 404 }));
}
