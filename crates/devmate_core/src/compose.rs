//! Prompt composer: priming + the user's question → one provider request.

use std::sync::Arc;

use devmate_llms::{GenerateRequest, GenerationConfig, Message};

use crate::error::{DevmateError, Result};
use crate::priming::Priming;

/// Message returned when the question is missing or blank.
pub const PROBLEM_REQUIRED: &str = "Problem is required";

/// Build the outbound request.
///
/// The priming turns go first, unchanged; `user_text` is appended verbatim as
/// the final user turn. Blank text fails with [`DevmateError::Validation`].
pub fn compose(
    priming: &Priming,
    user_text: &str,
    model: &str,
    config: &GenerationConfig,
) -> Result<GenerateRequest> {
    if user_text.trim().is_empty() {
        return Err(DevmateError::Validation(PROBLEM_REQUIRED.to_string()));
    }

    let mut messages = Vec::with_capacity(priming.turns().len() + 1);
    messages.extend_from_slice(priming.turns());
    messages.push(Message::user(user_text));

    let mut request = GenerateRequest::new(model, messages).with_config(config.clone());
    if let Some(instruction) = priming.system_instruction() {
        request = request.with_system_instruction(instruction);
    }
    Ok(request)
}

/// Holds the fixed parts of every request: persona, model and sampling parameters.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    priming: Arc<Priming>,
    model: String,
    config: GenerationConfig,
}

impl PromptComposer {
    pub fn new(priming: Priming, model: impl Into<String>) -> Self {
        Self {
            priming: Arc::new(priming),
            model: model.into(),
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn priming(&self) -> &Priming {
        &self.priming
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn compose(&self, user_text: &str) -> Result<GenerateRequest> {
        compose(&self.priming, user_text, &self.model, &self.config)
    }
}
