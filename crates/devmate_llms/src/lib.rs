//! devmate_llms: Provider-agnostic completion SDK.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  HashMap<String, Arc<dyn Provider>>           │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                       │                              │
//! │              ┌────────┴────────┐                     │
//! │              ▼                 ▼                     │
//! │        ┌──────────┐     ┌──────────────┐            │
//! │        │  Gemini  │     │ OpenAI-compat │            │
//! │        │ Provider │     │   Provider    │            │
//! │        └──────────┘     └──────────────┘            │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use devmate_llms::{GeminiProvider, ProviderRegistry};
//!
//! let provider = GeminiProvider::from_env().unwrap();
//! let registry = ProviderRegistry::new().register("gemini", provider);
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

// Re-export provider implementations
pub use providers::GeminiProvider;
pub use providers::OpenAIProvider;

// Re-export commonly used types
pub use types::{
    ConversationTurn, GenerateRequest, GenerateResponse, GenerationConfig, Headers, Message,
    Role, Usage,
};
