//! Chat session against a mock relay.

use chat_client::{ChatSession, ClientError, ExchangeView, RelayClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_for(server: &MockServer) -> ChatSession {
    ChatSession::new(RelayClient::new(&server.uri()).unwrap())
}

#[tokio::test]
async fn successful_exchange_renders_and_records_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({ "query": "What is Rust?", "history": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "## Rust\n\nA **systems** language.",
            "sources": [{ "uri": "https://www.rust-lang.org/", "title": "Rust" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    let view = session.ask("  What is Rust?  ").await.unwrap();

    match &view {
        ExchangeView::Answer { result, markup } => {
            assert_eq!(result.sources.len(), 1);
            assert!(markup.contains("<h2>Rust</h2>"));
            assert!(markup.contains("<strong>systems</strong>"));
            assert!(markup.contains(">www.rust-lang.org</p>"));
        }
        other => panic!("expected answer, got {other:?}"),
    }

    let turns = session.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!((turns[0].role.as_str(), turns[0].text.as_str()), ("user", "What is Rust?"));
    assert_eq!(turns[1].role, "model");
    assert_eq!(turns[1].text, "## Rust\n\nA **systems** language.");
}

#[tokio::test]
async fn follow_up_sends_previous_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({ "query": "first", "history": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "one", "sources": [] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "query": "second",
            "history": [
                { "role": "user", "text": "first" },
                { "role": "model", "text": "one" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "two", "sources": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    assert!(!session.ask("first").await.unwrap().is_failure());
    assert!(!session.ask("second").await.unwrap().is_failure());
    assert_eq!(session.transcript().user_turn_count(), 2);

    session.clear();
    assert!(session.transcript().is_empty());
}

#[tokio::test]
async fn blank_input_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    assert!(session.ask("   ").await.is_none());
}

#[tokio::test]
async fn relay_error_shows_panel_and_keeps_transcript() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Failed to communicate with the AI model or process the response."
        })))
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    let view = session.ask("hello").await.unwrap();

    match &view {
        ExchangeView::Failure { message, markup } => {
            assert_eq!(
                message,
                "Failed to communicate with the AI model or process the response."
            );
            assert!(markup.contains("Request Failed"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(session.transcript().is_empty());
}

#[tokio::test]
async fn error_status_without_message_uses_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = RelayClient::new(&server.uri()).unwrap();
    let err = client.generate("hello", &[]).await.unwrap_err();
    match err {
        ClientError::Relay(message) => assert_eq!(message, "Backend returned status 502"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_page_uses_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(504).set_body_string("<html>Gateway Timeout</html>"))
        .mount(&server)
        .await;

    let client = RelayClient::new(&server.uri()).unwrap();
    match client.generate("hello", &[]).await {
        Err(ClientError::Relay(message)) => assert_eq!(message, "Backend returned status 504"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn error_field_on_success_status_is_still_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Server Error: Gemini API Key is missing.",
            "text": "Mocked response"
        })))
        .mount(&server)
        .await;

    let client = RelayClient::new(&server.uri()).unwrap();
    assert!(matches!(
        client.generate("hello", &[]).await,
        Err(ClientError::Relay(_))
    ));
}
