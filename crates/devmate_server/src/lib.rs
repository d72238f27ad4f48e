//! devmate-server: the HTTP boundary around the solve relay.
//!
//! ```text
//! POST /api/solve  { "problem": "..." }
//!   200 { "solution": "..." }
//!   400 { "error": "Problem is required" }
//!   500 { "error": "Failed to generate solution" }
//! GET  /health     { "status": "ok" }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::future::Future;

use tokio::net::TcpListener;

pub use config::{ProviderKind, ServerConfig};
pub use error::{ApiError, ServerError};
pub use routes::router;
pub use state::AppState;

/// Build the relay from `config`, bind, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let relay = bootstrap::build_relay(&config)?;
    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        provider = %config.provider,
        model = %config.model,
        "devmate relay listening"
    );

    serve_on(listener, AppState::new(relay), shutdown_signal()).await
}

/// Serve `state` on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("devmate relay stopped");
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
