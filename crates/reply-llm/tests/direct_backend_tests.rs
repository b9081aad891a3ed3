//! DirectBackend against a mock Gemini endpoint.

use reply_core::{GenerationRequest, ReplyError, Tone};
use reply_llm::{DirectBackend, ReplyBackend};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest::new("Explain the fix", "", Tone::Technical)
        .with_model("gemini-2.5-flash")
        .with_max_output_tokens(1024)
}

fn backend(server: &MockServer) -> DirectBackend {
    DirectBackend::new(reqwest::Client::new(), "test-api-key")
        .with_base_url(format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn sends_prompt_and_generation_config_with_query_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-api-key"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text": "PROMPT"}]}],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 1024,
                "topK": 40,
                "topP": 0.95
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Restart the service."}], "role": "model"},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = backend(&mock_server)
        .generate("PROMPT", &request())
        .await
        .expect("generation should succeed");

    assert_eq!(response.candidate_text(), Some("Restart the service."));
    assert_eq!(response.finish_reason(), Some("STOP"));
}

#[tokio::test]
async fn provider_error_status_is_a_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .generate("PROMPT", &request())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReplyError::Protocol {
            message: "API key not valid".to_string(),
            details: Some("status=INVALID_ARGUMENT, code=400".to_string()),
        }
    );
}

#[tokio::test]
async fn unauthorized_is_not_a_license_error_for_direct_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "denied"}})),
        )
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .generate("PROMPT", &request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "protocol_error");
}

#[tokio::test]
async fn html_error_page_is_a_connection_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html><body>Bad Gateway</body></html>"))
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .generate("PROMPT", &request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "connection_error");
}

#[tokio::test]
async fn empty_body_is_a_connection_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let err = backend(&mock_server)
        .generate("PROMPT", &request())
        .await
        .unwrap_err();
    assert!(matches!(err, ReplyError::Connection(message) if message.contains("Could not reach")));
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    let backend = DirectBackend::new(reqwest::Client::new(), "k").with_base_url("http://127.0.0.1:1");

    let err = backend.generate("PROMPT", &request()).await.unwrap_err();
    assert_eq!(err.kind(), "connection_error");
}
