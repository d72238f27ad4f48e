//! Conversion between unified types and OpenAI types

use super::types::{OpenAIMessage, OpenAIRequest, OpenAIResponse};
use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse, Message, Role, Usage};

/// Convert unified request to OpenAI request.
///
/// Top-k has no Chat Completions equivalent and is dropped.
pub fn to_openai_request(req: &GenerateRequest) -> OpenAIRequest {
    let mut messages = Vec::with_capacity(req.messages.len() + 1);
    if let Some(instruction) = &req.system_instruction {
        messages.push(OpenAIMessage {
            role: "system".to_string(),
            content: Some(instruction.clone()),
        });
    }
    messages.extend(req.messages.iter().map(to_openai_message));

    OpenAIRequest {
        model: req.model.clone(),
        messages,
        temperature: Some(req.config.temperature),
        top_p: Some(req.config.top_p),
        max_tokens: Some(req.config.max_output_tokens),
    }
}

fn to_openai_message(msg: &Message) -> OpenAIMessage {
    let role = match msg.role {
        Role::User => "user",
        Role::Model => "assistant",
    };
    OpenAIMessage {
        role: role.to_string(),
        content: Some(msg.text.clone()),
    }
}

/// Convert OpenAI response to unified response
pub fn from_openai_response(resp: OpenAIResponse) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_response("No choices in OpenAI response"))?;

    let text = choice
        .message
        .content
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::invalid_response("No content in OpenAI response"))?;

    Ok(GenerateResponse {
        text,
        finish_reason: choice.finish_reason,
        usage: resp.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roles_and_system_message() {
        let req = GenerateRequest::new(
            "gpt-4o-mini",
            vec![Message::user("a"), Message::model("b"), Message::user("c")],
        )
        .with_system_instruction("coding only");
        let out = to_openai_request(&req);
        let roles: Vec<&str> = out.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(out.max_tokens, Some(8192));
    }

    #[test]
    fn test_from_response() {
        let resp: OpenAIResponse = serde_json::from_value(json!({
            "id": "x",
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "role": "assistant", "content": "hi" }, "finish_reason": "stop" }],
            "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
        }))
        .unwrap();
        let out = from_openai_response(resp).unwrap();
        assert_eq!(out.text, "hi");
        assert_eq!(out.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_empty_choices_is_error() {
        let resp: OpenAIResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(from_openai_response(resp).is_err());
    }
}
