//! `serve` command
//!
//! Starts the HTTP host and blocks until shutdown is requested.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::ServeArgs;
use crate::error::ShowcaseError;
use crate::fetch::HttpDataSource;
use crate::server::{AppState, HttpConfig, Server, parse_bind_addr};

use super::load_config;

/// Serve the portfolio page until cancelled.
///
/// # Errors
///
/// Returns a config error if the configuration is invalid, or a server
/// error if the listener cannot bind or the server loop fails.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), ShowcaseError> {
    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    let mut overrides = args.source.overrides();
    overrides.bind.clone_from(&args.bind);
    let config = load_config(args.source.config.as_deref(), &overrides)?;

    let bind_addr = parse_bind_addr(&config.server.bind)?;
    let source = HttpDataSource::new(config.endpoints.clone())?;
    tracing::debug!(
        general_info = %config.endpoints.general_info,
        portfolio = %config.endpoints.portfolio,
        "document endpoints"
    );

    let state = Arc::new(AppState::new(Arc::new(source), config.site.clone()));
    let server = Server::bind(HttpConfig { bind_addr }, state, cancel).await?;

    server.wait().await?;
    tracing::info!("server stopped");
    Ok(())
}
