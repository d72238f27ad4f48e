//! `devmate providers` subcommands.

use anyhow::Result;
use comfy_table::{Cell, Color};
use devmate_llms::Provider as _;
use devmate_llms::ProviderRegistry;
use devmate_server::bootstrap::build_registry;
use devmate_server::{ProviderKind, ServerConfig};
use serde::Serialize;

use crate::cli::ProvidersAction;
use crate::output;

#[derive(Debug, Serialize)]
struct ProviderRow {
    id: &'static str,
    api_key_env: &'static str,
    configured: bool,
    selected: bool,
    models: Vec<String>,
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list().await,
    }
}

async fn list() -> Result<()> {
    let config = ServerConfig::from_env()?;
    let registry = build_registry(&config)?;
    let rows = provider_rows(&config, &registry).await;

    if output::is_json() {
        output::data("providers", &rows);
        return Ok(());
    }

    output::header("Providers");
    let mut table = output::table();
    table.set_header(vec![
        output::header_cell("Provider"),
        output::header_cell("Status"),
        output::header_cell("Models"),
    ]);
    for row in &rows {
        let id = if row.selected {
            format!("{} (selected)", row.id)
        } else {
            row.id.to_string()
        };
        let status = if row.configured {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new(format!("set {}", row.api_key_env)).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(id).fg(Color::Green),
            status,
            Cell::new(format_models(&row.models)),
        ]);
    }
    println!("{table}");
    output::kv("model", &config.model);

    Ok(())
}

async fn provider_rows(config: &ServerConfig, registry: &ProviderRegistry) -> Vec<ProviderRow> {
    let mut rows = Vec::new();
    for kind in [ProviderKind::Gemini, ProviderKind::OpenAI] {
        let configured = config.has_key_for(kind);
        let models = match registry.get_provider(kind.as_str()) {
            Ok(provider) => provider.list_models().await.unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        rows.push(ProviderRow {
            id: kind.as_str(),
            api_key_env: kind.api_key_env(),
            configured,
            selected: kind == config.provider,
            models,
        });
    }
    rows
}

fn format_models(models: &[String]) -> String {
    match models.len() {
        0 => "-".to_string(),
        1..=3 => models.join(", "),
        n => format!("{}, {}, {} (+{} more)", models[0], models[1], models[2], n - 3),
    }
}
