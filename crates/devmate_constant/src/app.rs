//! Application metadata constants

pub const NAME: &str = "devmate";
pub const DISPLAY_NAME: &str = "DevMate";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "AI code assistant relay: ask a coding question, get prose and code back";

/// Address the relay server binds to when DEVMATE_ADDR is unset
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Base URL `devmate ask` talks to when --server is not given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// The single relay operation
pub const SOLVE_ROUTE: &str = "/api/solve";
pub const HEALTH_ROUTE: &str = "/health";

/// Provider used when DEVMATE_PROVIDER is unset
pub const DEFAULT_PROVIDER: &str = "gemini";
/// Model used when DEVMATE_MODEL is unset
pub const DEFAULT_MODEL: &str = "gemini-pro";
/// Model used for the OpenAI-compatible provider when DEVMATE_MODEL is unset
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
