//! HTTP host for the portfolio page.
//!
//! Binds `GET /` to the render operation. A successful render is served as
//! `text/html`; any failure produces a fixed, opaque error page with status
//! 500 and never a partial page.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::config::schema::SiteContent;
use crate::error::ServerError;
use crate::fetch::DataSource;
use crate::observability::metrics;
use crate::page::render_document;

/// Body served when a render fails.
pub const ERROR_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Error</title></head>\n<body><p>Internal Server Error</p></body>\n</html>\n";

/// Configuration for the HTTP host.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Address to bind to, e.g. `"0.0.0.0:3000"`.
    pub bind_addr: String,
}

/// State shared by every request.
///
/// Holds only immutable data: each request performs its own fetches.
pub struct AppState {
    source: Arc<dyn DataSource>,
    content: SiteContent,
}

impl AppState {
    /// Creates the shared state.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, content: SiteContent) -> Self {
        Self { source, content }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// A running HTTP host.
pub struct Server {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Binds the listener and starts serving in a background task.
    ///
    /// Binding to port 0 picks a free port; [`Server::local_addr`] reports
    /// the one actually bound.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the TCP listener cannot bind.
    pub async fn bind(
        config: HttpConfig,
        state: Arc<AppState>,
        cancel: CancellationToken,
    ) -> Result<Self, ServerError> {
        let listener =
            TcpListener::bind(&config.bind_addr)
                .await
                .map_err(|source| ServerError::Bind {
                    addr: config.bind_addr.clone(),
                    source,
                })?;

        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;

        let router = build_router(state);
        let server_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            info!(%local_addr, "HTTP server listening");
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    server_cancel.cancelled().await;
                })
                .await;
            debug!("HTTP server shut down");
            result
        });

        Ok(Self {
            local_addr,
            cancel,
            handle,
        })
    }

    /// Address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts a graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Waits for the server task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] if the server loop failed or panicked.
    pub async fn wait(self) -> Result<(), ServerError> {
        self.handle
            .await
            .map_err(|e| ServerError::Serve(std::io::Error::other(e.to_string())))?
            .map_err(ServerError::Serve)
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("local_addr", &self.local_addr)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Axum Router
// ============================================================================

/// Builds the router serving the page at `/`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /` handler.
async fn handle_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    match render_document(state.source.as_ref(), &state.content).await {
        Ok(html) => {
            metrics::record_request(uri.path(), StatusCode::OK.as_u16());
            Html(html).into_response()
        }
        Err(e) => {
            error!(error = %e, "page render failed");
            metrics::record_request(uri.path(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
        }
    }
}

/// Any path other than `/`.
async fn handle_not_found(uri: Uri) -> StatusCode {
    metrics::record_request(uri.path(), StatusCode::NOT_FOUND.as_u16());
    StatusCode::NOT_FOUND
}

// ============================================================================
// Helpers
// ============================================================================

/// Parses a bind address string into a full `host:port` form.
///
/// Accepts:
/// - `:3000` → `0.0.0.0:3000`
/// - `3000` → `0.0.0.0:3000`
/// - `1.2.3.4:3000` → as-is
///
/// # Errors
///
/// Returns [`ServerError::InvalidAddress`] if the result cannot be parsed
/// as a valid socket address.
pub fn parse_bind_addr(input: &str) -> Result<String, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServerError::InvalidAddress {
            input: input.to_string(),
            message: e.to_string(),
        })?;
    Ok(addr)
}

// ============================================================================
// Tests
// ============================================================================
