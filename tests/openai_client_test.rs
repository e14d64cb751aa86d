//! Chat Completions backend against a mocked HTTP server.

use gitscribe::llm::openai::OpenAiClient;
use gitscribe::{GenerationError, complete};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run one completion against `base` off the async runtime; the blocking
/// reqwest client must not live on a runtime thread.
async fn complete_at(base: String) -> Result<String, GenerationError> {
    tokio::task::spawn_blocking(move || {
        let client = OpenAiClient::new("test-key".into(), "mistral-small-latest".into(), base)?;
        complete(&client, "be terse", "the diff", 0.5)
    })
    .await
    .expect("blocking task panicked")
}

fn answer(content: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    }))
}

#[tokio::test(flavor = "multi_thread")]
async fn sends_model_messages_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "mistral-small-latest",
            "temperature": 0.5,
            "messages": [
                { "role": "system", "content": "be terse" },
                { "role": "user", "content": "the diff" }
            ]
        })))
        .respond_with(answer(json!("  feat: add parser\n")))
        .expect(1)
        .mount(&server)
        .await;

    let text = complete_at(server.uri()).await.unwrap();
    assert_eq!(text, "feat: add parser");
}

#[tokio::test(flavor = "multi_thread")]
async fn versioned_base_url_is_not_doubled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(answer(json!("fix: x")))
        .expect(1)
        .mount(&server)
        .await;

    let text = complete_at(format!("{}/v1/", server.uri())).await.unwrap();
    assert_eq!(text, "fix: x");
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = complete_at(server.uri()).await.unwrap_err();
    match err {
        GenerationError::Http { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = complete_at(server.uri()).await.unwrap_err();
    assert!(matches!(err, GenerationError::NoChoices));
}

#[tokio::test(flavor = "multi_thread")]
async fn null_content_is_an_empty_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer(serde_json::Value::Null))
        .mount(&server)
        .await;

    let err = complete_at(server.uri()).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCompletion));
}

#[tokio::test(flavor = "multi_thread")]
async fn garbage_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = complete_at(server.uri()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Decode(_)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let client = OpenAiClient::new(
        "test-key".into(),
        "mistral-small-latest".into(),
        "http://127.0.0.1:1".into(),
    )
    .unwrap();

    let err = complete(&client, "s", "u", 0.2).unwrap_err();
    match err {
        GenerationError::Transport { url, .. } => {
            assert_eq!(url, "http://127.0.0.1:1/v1/chat/completions");
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
}
