//! Command dispatch.

pub mod ask;
pub mod providers;
pub mod serve;

use anyhow::Result;

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve {
            addr,
            provider,
            model,
            stateless,
        } => serve::handle(addr, provider, model, stateless).await,
        Command::Ask {
            problem,
            server,
            raw,
            copy,
            edit,
        } => {
            let options = ask::AskOptions {
                server,
                raw,
                copy,
                edit,
            };
            ask::handle(&problem, &options).await
        }
        Command::Providers { action } => providers::handle(action).await,
    }
}
