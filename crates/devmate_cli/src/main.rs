//! CLI entry point for devmate.

mod cli;
mod clipboard;
mod commands;
mod editor;
mod output;
mod render;

use clap::Parser;
use devmate_constant::app;
use devmate_observability::ObservabilityConfig;

use crate::cli::{Cli, Command};

/// Logging setup: `devmate serve` logs at info, one-shot commands stay quiet unless asked.
fn init_tracing(cli: &Cli) {
    let mut config = ObservabilityConfig::from_env().with_version(app::VERSION);
    if std::env::var("OTEL_SERVICE_NAME").is_err() && std::env::var("SERVICE_NAME").is_err() {
        config.service_name = cli.command.service_name().to_string();
    }
    if cli.verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() && !matches!(cli.command, Command::Serve { .. }) {
        config = config.with_log_level("warn");
    }

    if let Err(e) = devmate_observability::init(config) {
        output::warning(&format!("tracing disabled: {}", e));
    }
}

#[tokio::main]
async fn main() {
    // .env supplies API keys and DEVMATE_* settings; real environment wins.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::init(cli.output);
    init_tracing(&cli);

    let result = commands::handle(cli).await;
    devmate_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
