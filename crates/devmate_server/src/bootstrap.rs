//! Startup wiring: credentials → provider registry → the one shared relay.

use std::sync::Arc;

use devmate_core::{Priming, PromptComposer, Relay};
use devmate_llms::providers::gemini::GeminiConfig;
use devmate_llms::providers::openai::OpenAIConfig;
use devmate_llms::{GeminiProvider, OpenAIProvider, ProviderRegistry};

use crate::config::{ProviderKind, ServerConfig};
use crate::error::ServerError;

/// Register every provider that has a key.
pub fn build_registry(config: &ServerConfig) -> Result<ProviderRegistry, ServerError> {
    let mut registry = ProviderRegistry::new();

    if let Some(key) = config.gemini_api_key() {
        let mut gemini = GeminiConfig::new(key);
        if let Some(timeout) = config.request_timeout {
            gemini = gemini.with_request_timeout(timeout);
        }
        registry = registry.register(ProviderKind::Gemini.as_str(), GeminiProvider::new(gemini)?);
    }

    if let Some(key) = config.openai_api_key() {
        let mut openai = OpenAIConfig::new(key);
        if let Some(timeout) = config.request_timeout {
            openai = openai.with_request_timeout(timeout);
        }
        registry = registry.register(ProviderKind::OpenAI.as_str(), OpenAIProvider::new(openai)?);
    }

    Ok(registry)
}

/// The persona for this process.
pub fn load_priming(config: &ServerConfig) -> Result<Priming, ServerError> {
    let priming = if config.stateless {
        Priming::stateless()
    } else if let Some(path) = &config.priming_file {
        Priming::from_path(path)?
    } else {
        Priming::devmate()?
    };

    Ok(if config.flatten_priming {
        priming.flattened()
    } else {
        priming
    })
}

/// Build the relay for the configured provider out of `registry`.
pub fn relay_from_registry(
    config: &ServerConfig,
    registry: &ProviderRegistry,
) -> Result<Relay, ServerError> {
    let provider = registry.get_provider(config.provider.as_str()).map_err(|_| {
        ServerError::Config(format!(
            "provider '{}' selected but {} is not set",
            config.provider,
            config.provider.api_key_env()
        ))
    })?;

    let priming = load_priming(config)?;
    tracing::info!(
        provider = %config.provider,
        model = %config.model,
        priming.turns = priming.turns().len(),
        priming.system_instruction = priming.system_instruction().is_some(),
        "relay ready"
    );

    Ok(Relay::new(provider, PromptComposer::new(priming, config.model.clone())))
}

/// Build the shared relay from configuration.
pub fn build_relay(config: &ServerConfig) -> Result<Arc<Relay>, ServerError> {
    let registry = build_registry(config)?;
    tracing::debug!(providers = ?registry.list_providers(), "providers registered");
    Ok(Arc::new(relay_from_registry(config, &registry)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_only_holds_configured_providers() {
        let config = ServerConfig::new().with_gemini_api_key("g-key");
        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.list_providers(), vec!["gemini".to_string()]);
    }

    #[test]
    fn test_missing_key_for_selected_provider() {
        let config = ServerConfig::new()
            .with_gemini_api_key("g-key")
            .with_provider(ProviderKind::OpenAI);
        let err = build_relay(&config).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(!err.to_string().contains("g-key"));
    }

    #[test]
    fn test_default_relay_uses_devmate_persona() {
        let config = ServerConfig::new().with_gemini_api_key("g-key");
        let relay = build_relay(&config).unwrap();
        assert_eq!(relay.provider_id(), "gemini");
        assert_eq!(relay.composer().model(), "gemini-pro");
        assert_eq!(relay.composer().priming().turns().len(), 10);
    }

    #[test]
    fn test_stateless_and_flattened_priming() {
        let stateless = load_priming(&ServerConfig::new().with_stateless(true)).unwrap();
        assert!(stateless.is_empty());

        let flat = load_priming(&ServerConfig::new().with_flatten_priming(true)).unwrap();
        assert!(flat.turns().is_empty());
        assert!(flat.system_instruction().is_some());
    }

    #[test]
    fn test_missing_priming_file() {
        let config = ServerConfig::new().with_priming_file("/no/such/persona.toml");
        assert!(matches!(load_priming(&config), Err(ServerError::Core(_))));
    }
}
