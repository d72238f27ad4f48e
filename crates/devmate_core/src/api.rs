//! JSON wire types of the solve endpoint.

use serde::{Deserialize, Serialize};

use crate::relay::RelayError;

/// `POST /api/solve` body. A missing `problem` is treated like a blank one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub problem: Option<String>,
}

impl SolveRequest {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: Some(problem.into()),
        }
    }
}

/// `POST /api/solve` reply: either `{ "solution" }` or `{ "error" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Solution { solution: String },
    Error { error: String },
}

impl SolveResponse {
    pub fn solution(text: impl Into<String>) -> Self {
        SolveResponse::Solution {
            solution: text.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SolveResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SolveResponse::Error { .. })
    }
}

impl From<&RelayError> for SolveResponse {
    fn from(err: &RelayError) -> Self {
        SolveResponse::error(err.public_message())
    }
}
