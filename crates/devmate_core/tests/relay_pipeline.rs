//! Relay + extractor with a scripted provider standing in for the model.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devmate_core::{
    extract, CodePanel, Priming, PromptComposer, Relay, RelayError, NO_CODE_SENTINEL,
};
use devmate_llms::{GenerateRequest, GenerateResponse, Headers, Provider};

struct ScriptedProvider {
    reply: String,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn build_headers(&self, _custom: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> devmate_llms::Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(GenerateResponse::text(self.reply.clone()))
    }
}

#[tokio::test]
async fn solve_then_extract_code_and_prose() {
    let provider = ScriptedProvider::replying(
        "Use a loop:\n```js\nfor (let i = 1; i <= 100; i++) console.log(i);\n```\nThat prints 1..100.",
    );
    let relay = Relay::new(
        provider.clone(),
        PromptComposer::new(Priming::devmate().unwrap(), "gemini-pro"),
    );

    let reply = relay.solve(Some("print 1 to 100")).await.unwrap();
    let extracted = extract(&reply);

    assert_eq!(
        extracted.code_or_sentinel(),
        "for (let i = 1; i <= 100; i++) console.log(i);"
    );
    assert_eq!(extracted.prose, "Use a loop:\n\nThat prints 1..100.");

    let panel = CodePanel::from_extracted(&extracted).unwrap();
    assert_eq!(panel.render_language(), "javascript");

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[0].config.top_k, 64);
    assert_eq!(requests[0].config.max_output_tokens, 8192);
}

#[tokio::test]
async fn stateless_relay_sends_single_turn() {
    let provider = ScriptedProvider::replying("No code needed, just use a set.");
    let relay = Relay::new(
        provider.clone(),
        PromptComposer::new(Priming::stateless(), "gemini-2.0-pro-exp-02-05"),
    );

    let reply = relay.solve(Some("dedupe a list?")).await.unwrap();
    let extracted = extract(&reply);
    assert_eq!(extracted.code_or_sentinel(), NO_CODE_SENTINEL);
    assert!(CodePanel::from_extracted(&extracted).is_none());

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[0].model, "gemini-2.0-pro-exp-02-05");
}

#[tokio::test]
async fn missing_problem_is_rejected() {
    let provider = ScriptedProvider::replying("unused");
    let relay = Relay::new(provider.clone(), PromptComposer::new(Priming::stateless(), "m"));

    let err = relay.solve(None).await.unwrap_err();
    assert!(matches!(err, RelayError::Validation(_)));
    assert!(provider.requests.lock().unwrap().is_empty());
}
