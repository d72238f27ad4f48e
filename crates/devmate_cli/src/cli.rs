//! CLI argument definitions using clap derive macros.

use std::net::SocketAddr;

use clap::{Parser, Subcommand, ValueEnum};
use devmate_constant::app;

/// Ask a coding question, get prose and code back
#[derive(Parser)]
#[command(name = "devmate", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the relay server
    Serve {
        /// Address to bind (default: DEVMATE_ADDR or 127.0.0.1:3000)
        #[arg(long)]
        addr: Option<SocketAddr>,
        /// Provider to use (gemini, openai). Uses DEVMATE_PROVIDER if not set.
        #[arg(long)]
        provider: Option<String>,
        /// Model to use (e.g. gemini-pro). Uses DEVMATE_MODEL if not set.
        #[arg(long)]
        model: Option<String>,
        /// Send questions without the priming conversation
        #[arg(long)]
        stateless: bool,
    },
    /// Ask a running relay a question
    Ask {
        /// The coding question
        problem: String,
        /// Relay base URL
        #[arg(long, default_value = app::DEFAULT_SERVER_URL)]
        server: String,
        /// Print the reply as-is instead of splitting out the code
        #[arg(long)]
        raw: bool,
        /// Copy the code block to the clipboard
        #[arg(long)]
        copy: bool,
        /// Open the code block in $EDITOR before copying
        #[arg(long)]
        edit: bool,
    },
    /// Inspect configured providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List providers, key status and known models
    List,
}

impl Command {
    /// Name reported to tracing for this invocation.
    pub fn service_name(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "devmate-server",
            _ => "devmate-cli",
        }
    }
}
