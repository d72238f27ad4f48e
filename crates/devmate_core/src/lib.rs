//! devmate-core: the relay between a coding question and a model answer.
//!
//! - [`priming`]: scripted persona turns loaded from TOML
//! - [`compose`]: builds the provider request from priming + user text
//! - [`extract`]: splits a reply into prose and its first fenced code block
//! - [`panel`]: view/edit/copy state for an extracted code block
//! - [`relay`]: one solve call end to end, with the boundary error mapping
//! - [`api`]: JSON wire types of the solve endpoint

pub mod api;
pub mod compose;
pub mod error;
pub mod extract;
pub mod panel;
pub mod priming;
pub mod relay;

pub use api::{SolveRequest, SolveResponse};
pub use compose::{compose, PromptComposer, PROBLEM_REQUIRED};
pub use error::{DevmateError, Result};
pub use extract::{
    extract, normalize_language, present, CodeBlock, Extracted, Presentation, PresentationMode,
    NO_CODE_SENTINEL,
};
pub use panel::{Clipboard, CodePanel, PanelMode, COPIED_INDICATOR_DURATION};
pub use priming::Priming;
pub use relay::{Relay, RelayError, GENERATION_FAILED};
