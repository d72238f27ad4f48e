//! Conversion between unified types and Gemini types

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
};
use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse, GenerationConfig, Message, Usage};

/// Finish reasons that withhold the candidate text
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "LANGUAGE",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Convert unified request to Gemini request
pub fn to_gemini_request(req: &GenerateRequest) -> GeminiRequest {
    GeminiRequest {
        contents: req.messages.iter().map(to_gemini_content).collect(),
        system_instruction: req.system_instruction.as_ref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(text.clone()),
            }],
        }),
        generation_config: to_gemini_generation_config(&req.config),
    }
}

fn to_gemini_content(msg: &Message) -> GeminiContent {
    GeminiContent {
        role: Some(msg.role.as_str().to_string()),
        parts: vec![GeminiPart {
            text: Some(msg.text.clone()),
        }],
    }
}

fn to_gemini_generation_config(config: &GenerationConfig) -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
        max_output_tokens: config.max_output_tokens,
        response_mime_type: config.response_mime_type.clone(),
    }
}

/// Convert Gemini response to unified response
pub fn from_gemini_response(resp: GeminiResponse) -> Result<GenerateResponse> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(Error::invalid_response(format!(
            "Gemini returned no candidates ({})",
            reason
        )));
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| BLOCKING_FINISH_REASONS.contains(r))
    {
        return Err(Error::invalid_response(format!(
            "Gemini stopped the candidate (finish reason: {})",
            reason
        )));
    }

    // STOP with no text parts is an empty answer, not an error.
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let usage = resp.usage_metadata.map(|u| Usage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    Ok(GenerateResponse {
        text,
        finish_reason: candidate.finish_reason,
        usage,
    })
}
