//! Server configuration, read from the environment once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use devmate_constant::app;
use devmate_llms::{GeminiProvider, OpenAIProvider};

use crate::error::ServerError;

/// Upstream model API selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAI,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => app::DEFAULT_MODEL,
            ProviderKind::OpenAI => app::DEFAULT_OPENAI_MODEL,
        }
    }

    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => GeminiProvider::API_KEY_ENV,
            ProviderKind::OpenAI => OpenAIProvider::API_KEY_ENV,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAI),
            other => Err(ServerError::Config(format!("unknown provider '{}'", other))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the server needs to start.
#[derive(Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub provider: ProviderKind,
    pub model: String,
    /// Operator persona file; the built-in DevMate script when unset
    pub priming_file: Option<PathBuf>,
    /// Send the question alone, without priming turns
    pub stateless: bool,
    /// Fold priming turns into a system instruction
    pub flatten_priming: bool,
    /// Upper bound on one upstream call (None = wait for completion)
    pub request_timeout: Option<Duration>,
    gemini_api_key: Option<String>,
    openai_api_key: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("addr", &self.addr)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("priming_file", &self.priming_file)
            .field("stateless", &self.stateless)
            .field("flatten_priming", &self.flatten_priming)
            .field("request_timeout", &self.request_timeout)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            provider: ProviderKind::default(),
            model: app::DEFAULT_MODEL.to_string(),
            priming_file: None,
            stateless: false,
            flatten_priming: false,
            request_timeout: None,
            gemini_api_key: None,
            openai_api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Switch provider. A model still at the previous provider's default follows along.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        if self.model == self.provider.default_model() {
            self.model = provider.default_model().to_string();
        }
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_priming_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.priming_file = Some(path.into());
        self
    }

    pub fn with_stateless(mut self, stateless: bool) -> Self {
        self.stateless = stateless;
        self
    }

    pub fn with_flatten_priming(mut self, flatten: bool) -> Self {
        self.flatten_priming = flatten;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    /// Whether the selected provider has a key.
    pub fn has_key_for(&self, provider: ProviderKind) -> bool {
        match provider {
            ProviderKind::Gemini => self.gemini_api_key.is_some(),
            ProviderKind::OpenAI => self.openai_api_key.is_some(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, one call per variable.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(addr) = get("DEVMATE_ADDR") {
            config.addr = addr
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("DEVMATE_ADDR '{}' is not host:port", addr)))?;
        }

        if let Some(provider) = get("DEVMATE_PROVIDER") {
            config = config.with_provider(provider.parse()?);
        }

        if let Some(model) = get("DEVMATE_MODEL") {
            config.model = model.trim().to_string();
        }

        if let Some(path) = get("DEVMATE_PRIMING_FILE") {
            config.priming_file = Some(PathBuf::from(path.trim()));
        }

        if let Some(flag) = get("DEVMATE_STATELESS") {
            config.stateless = parse_flag("DEVMATE_STATELESS", &flag)?;
        }

        if let Some(flag) = get("DEVMATE_FLATTEN_PRIMING") {
            config.flatten_priming = parse_flag("DEVMATE_FLATTEN_PRIMING", &flag)?;
        }

        if let Some(secs) = get("DEVMATE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ServerError::Config(format!("DEVMATE_TIMEOUT_SECS '{}' is not a number", secs))
            })?;
            if secs > 0 {
                config.request_timeout = Some(Duration::from_secs(secs));
            }
        }

        config.gemini_api_key = get(GeminiProvider::API_KEY_ENV);
        config.openai_api_key = get(OpenAIProvider::API_KEY_ENV);

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ServerError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ServerError::Config(format!("{} '{}' is not a boolean", name, value))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.to_string(), app::DEFAULT_BIND_ADDR);
        assert_eq!(config.provider.as_str(), app::DEFAULT_PROVIDER);
        assert_eq!(config.model, "gemini-pro");
        assert!(config.request_timeout.is_none());
        assert!(!config.stateless);
        assert!(config.gemini_api_key().is_none());
    }

    #[test]
    fn test_full_environment() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DEVMATE_ADDR", "0.0.0.0:8080"),
            ("DEVMATE_PROVIDER", "OpenAI"),
            ("DEVMATE_PRIMING_FILE", "/etc/devmate/persona.toml"),
            ("DEVMATE_STATELESS", "yes"),
            ("DEVMATE_TIMEOUT_SECS", "30"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.priming_file, Some(PathBuf::from("/etc/devmate/persona.toml")));
        assert!(config.stateless);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert!(config.has_key_for(ProviderKind::OpenAI));
        assert!(!config.has_key_for(ProviderKind::Gemini));
    }

    #[test]
    fn test_explicit_model_survives_provider_switch() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DEVMATE_PROVIDER", "openai"),
            ("DEVMATE_MODEL", "gpt-4.1-mini"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4.1-mini");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = ServerConfig::from_lookup(lookup(&[("DEVMATE_TIMEOUT_SECS", "0")])).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        for pairs in [
            [("DEVMATE_ADDR", "nope")],
            [("DEVMATE_PROVIDER", "llama")],
            [("DEVMATE_STATELESS", "maybe")],
            [("DEVMATE_TIMEOUT_SECS", "soon")],
        ] {
            let err = ServerConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, ServerError::Config(_)), "{pairs:?}");
        }
    }

    #[test]
    fn test_blank_key_is_unset() {
        let config = ServerConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.gemini_api_key().is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ServerConfig::new().with_gemini_api_key("super-secret-key");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
