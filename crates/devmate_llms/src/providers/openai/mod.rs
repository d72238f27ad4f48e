//! OpenAI-compatible provider module
//!
//! Chat Completions API (OpenAI and gateways that mimic it).
//! API docs: https://platform.openai.com/docs/api-reference/chat

mod convert;
mod provider;
mod types;

pub use provider::OpenAIProvider;
pub use types::{OpenAIConfig, OpenAIRequest, OpenAIResponse};
