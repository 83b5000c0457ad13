//! Integration tests for the OpenAI Responses client using WireMock

use serde_json::json;
use tripcast::config::{ApiKey, LlmConfig};
use tripcast::{LanguageModel, OpenAiClient, TripcastError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const KEY: &str = "sk-test-openai-key";

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = LlmConfig {
        base_url: format!("{}/v1", server.uri()),
        ..Default::default()
    };
    OpenAiClient::new(&config).unwrap()
}

fn key() -> ApiKey {
    ApiKey::parse(Some(KEY), "OPENAI_API_KEY").unwrap()
}

#[tokio::test]
async fn test_complete_sends_model_and_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("authorization", format!("Bearer {KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "input": [{"role": "user", "content": "Pack for Dublin"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_123",
            "output_text": "{\"checklist\": [\"Umbrella\"], \"notes\": \"Rain\"}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .complete("Pack for Dublin", &key())
        .await
        .unwrap();

    assert_eq!(text, "{\"checklist\": [\"Umbrella\"], \"notes\": \"Rain\"}");
}

#[tokio::test]
async fn test_complete_reads_output_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_456",
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "Bring a scarf."}]
            }]
        })))
        .mount(&server)
        .await;

    let text = client_for(&server).complete("hi", &key()).await.unwrap();

    assert_eq!(text, "Bring a scarf.");
}

#[tokio::test]
async fn test_complete_maps_error_status() {
    let server = MockServer::start().await;
    let body = json!({
        "error": {
            "message": "Incorrect API key provided",
            "type": "invalid_request_error",
            "code": "invalid_api_key"
        }
    });
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(401).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("hi", &key()).await.unwrap_err();

    match err {
        TripcastError::Upstream {
            status,
            message,
            body: Some(upstream),
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
            assert_eq!(upstream, body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_non_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("hi", &key()).await.unwrap_err();

    assert_eq!(err.status_code(), 502);
    assert!(matches!(err, TripcastError::Upstream { body: None, .. }));
}
