//! Error types for provider calls

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing API key for provider '{0}'")]
    MissingApiKey(String),

    #[error("provider error: {0}")]
    ProviderError(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Self::ProviderError(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Longest slice of an upstream error body kept in the error message
pub(crate) const MAX_ERROR_BODY: usize = 512;

/// Cut an upstream error body to [`MAX_ERROR_BODY`] bytes on a char boundary.
pub(crate) fn truncate_error_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
