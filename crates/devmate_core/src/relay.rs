//! One solve call end to end: validate, compose, call the provider once.

use std::sync::Arc;
use std::time::Instant;

use devmate_llms::Provider;
use devmate_observability::{provider_span, record_duration, record_error};
use thiserror::Error;
use tracing::Instrument;

use crate::compose::{PromptComposer, PROBLEM_REQUIRED};
use crate::error::DevmateError;

/// Message returned for every failure past validation.
pub const GENERATION_FAILED: &str = "Failed to generate solution";

/// Failure of a solve call, split by who is at fault.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The question was missing or blank.
    #[error("{0}")]
    Validation(String),

    /// The upstream call failed. Details stay in the logs.
    #[error("provider call failed: {0}")]
    Provider(#[source] devmate_llms::Error),
}

impl RelayError {
    /// HTTP status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) => 400,
            RelayError::Provider(_) => 500,
        }
    }

    /// Text safe to hand back to a caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => PROBLEM_REQUIRED,
            RelayError::Provider(_) => GENERATION_FAILED,
        }
    }
}

impl From<DevmateError> for RelayError {
    fn from(err: DevmateError) -> Self {
        match err {
            DevmateError::Validation(message) => RelayError::Validation(message),
            DevmateError::Provider(e) => RelayError::Provider(e),
            other => RelayError::Provider(devmate_llms::Error::Other(other.to_string())),
        }
    }
}

/// Holds the provider handle and the composer. Shared read-only across requests.
#[derive(Clone)]
pub struct Relay {
    provider: Arc<dyn Provider>,
    composer: PromptComposer,
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("provider", &self.provider.provider_id())
            .field("composer", &self.composer)
            .finish()
    }
}

impl Relay {
    pub fn new(provider: Arc<dyn Provider>, composer: PromptComposer) -> Self {
        Self { provider, composer }
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Answer one question. A missing or blank question never reaches the provider.
    pub async fn solve(&self, problem: Option<&str>) -> Result<String, RelayError> {
        let request = self.composer.compose(problem.unwrap_or_default())?;

        let span = provider_span!(self.provider.provider_id(), self.composer.model());
        async move {
            let started = Instant::now();
            let result = self.provider.generate(request).await;
            record_duration("provider.duration_ms", started.elapsed());

            match result {
                Ok(response) => {
                    tracing::debug!(chars = response.text.len(), "provider replied");
                    Ok(response.text)
                }
                Err(e) => {
                    record_error(&e);
                    Err(RelayError::Provider(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}
