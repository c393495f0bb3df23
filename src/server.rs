//! Listener setup and the serve loop.

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Bind the configured listen address.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    Ok(listener)
}

/// Serve the API on `listener` until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
