//! The `Provider` trait every upstream model API implements

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A language-model backend. One call in, one complete text out.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier ("gemini", "openai").
    fn provider_id(&self) -> &str;

    /// Headers for an outbound call, including authentication.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Known model ids. Providers without a listing endpoint return a fixed list.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Issue a single completion request.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
