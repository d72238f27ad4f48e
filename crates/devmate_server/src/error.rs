use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use devmate_core::{GENERATION_FAILED, RelayError, SolveResponse};
use thiserror::Error;

/// Startup failures: bad configuration, missing credentials, unreadable persona.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Provider(#[from] devmate_llms::Error),

    #[error(transparent)]
    Core(#[from] devmate_core::DevmateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one solve request, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    Relay(RelayError),
    /// Body was not a JSON object with an optional `problem` string.
    Body(JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Relay(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Relay(err) => err.public_message(),
            ApiError::Body(_) => GENERATION_FAILED,
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(SolveResponse::error(self.public_message()))).into_response()
    }
}
