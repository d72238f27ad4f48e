//! `devmate serve`: run the relay in the foreground.

use std::net::SocketAddr;

use anyhow::Result;
use devmate_server::{ProviderKind, ServerConfig};

use crate::output;

pub async fn handle(
    addr: Option<SocketAddr>,
    provider: Option<String>,
    model: Option<String>,
    stateless: bool,
) -> Result<()> {
    let config = apply_overrides(ServerConfig::from_env()?, addr, provider, model, stateless)?;
    tracing::debug!(?config, "server configuration");

    output::kv("provider", config.provider.as_str());
    output::kv("model", &config.model);
    output::dim(&format!("Serving on http://{} (Ctrl-C to stop)", config.addr));

    devmate_server::serve(config).await?;
    Ok(())
}

/// Command-line flags win over the environment.
fn apply_overrides(
    mut config: ServerConfig,
    addr: Option<SocketAddr>,
    provider: Option<String>,
    model: Option<String>,
    stateless: bool,
) -> Result<ServerConfig> {
    if let Some(addr) = addr {
        config = config.with_addr(addr);
    }
    if let Some(provider) = provider {
        config = config.with_provider(provider.parse::<ProviderKind>()?);
    }
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if stateless {
        config = config.with_stateless(true);
    }
    Ok(config)
}
