//! GeminiProvider against a mocked generateContent endpoint.

use devmate_llms::providers::gemini::GeminiConfig;
use devmate_llms::{Error, GeminiProvider, GenerateRequest, Message, Provider};
use mockito::Matcher;
use serde_json::json;

fn provider_for(server: &mockito::Server) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig::new("test-key").with_base_url(server.url()))
        .expect("provider")
}

#[tokio::test]
async fn generate_sends_history_and_returns_text() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-pro:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "only coding" }] },
                { "role": "model", "parts": [{ "text": "Understood." }] },
                { "role": "user", "parts": [{ "text": "fizzbuzz in js" }] }
            ],
            "generationConfig": { "topK": 64, "maxOutputTokens": 8192, "responseMimeType": "text/plain" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "```js\nconsole.log(1)\n```" }] },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let request = GenerateRequest::new(
        "gemini-pro",
        vec![
            Message::user("only coding"),
            Message::model("Understood."),
            Message::user("fizzbuzz in js"),
        ],
    );
    let response = provider.generate(request).await?;

    assert_eq!(response.text, "```js\nconsole.log(1)\n```");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn upstream_failure_maps_to_provider_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-pro:generateContent")
        .with_status(429)
        .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let err = provider
        .generate(GenerateRequest::new("gemini-pro", vec![Message::user("q")]))
        .await
        .unwrap_err();

    match err {
        Error::ProviderError(message) => assert!(message.contains("429")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-pro:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider
        .generate(GenerateRequest::new("gemini-pro", vec![Message::user("q")]))
        .await;

    assert!(matches!(result, Err(Error::Http(_))));
}
