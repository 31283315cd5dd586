//! Shared integration-test harness: a fake document origin and helpers for
//! running the `showcase` binary.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::process::Output;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use showcase::config::Endpoints;
use tokio::net::TcpListener;
use tokio::sync::Barrier;
use tokio_util::sync::CancellationToken;

/// Environment variables that would leak into spawned processes.
const SHOWCASE_ENV: &[&str] = &[
    "SHOWCASE_CONFIG",
    "SHOWCASE_BIND",
    "SHOWCASE_GENERAL_INFO_URL",
    "SHOWCASE_PORTFOLIO_URL",
    "SHOWCASE_METRICS_PORT",
    "SHOWCASE_LOG_LEVEL",
];

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Document {
    pub status: u16,
    pub body: String,
}

impl Document {
    /// A `200 OK` response with a JSON body.
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

struct OriginState {
    general_info: Document,
    portfolio: Document,
    general_info_hits: AtomicUsize,
    portfolio_hits: AtomicUsize,
    /// When set, each response waits until the other document has also
    /// been requested.
    rendezvous: Option<Barrier>,
}

/// HTTP server serving `/general.json` and `/portfolio.json` on an
/// ephemeral port. Shuts down on drop.
pub struct FakeOrigin {
    addr: SocketAddr,
    state: Arc<OriginState>,
    cancel: CancellationToken,
}

impl FakeOrigin {
    pub async fn start(general_info: Document, portfolio: Document) -> Self {
        Self::spawn(general_info, portfolio, None).await
    }

    /// Origin that holds each response until both documents are being
    /// requested at the same time. A client fetching them one after the
    /// other never gets an answer.
    pub async fn paired(general_info: Document, portfolio: Document) -> Self {
        Self::spawn(general_info, portfolio, Some(Barrier::new(2))).await
    }

    #[allow(clippy::missing_panics_doc)]
    async fn spawn(general_info: Document, portfolio: Document, rendezvous: Option<Barrier>) -> Self {
        let state = Arc::new(OriginState {
            general_info,
            portfolio,
            general_info_hits: AtomicUsize::new(0),
            portfolio_hits: AtomicUsize::new(0),
            rendezvous,
        });

        let router = Router::new()
            .route("/general.json", get(serve_general_info))
            .route("/portfolio.json", get(serve_portfolio))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake origin");
        let addr = listener.local_addr().expect("no local addr");

        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await;
        });

        Self {
            addr,
            state,
            cancel,
        }
    }

    /// Origin serving a valid name and the given portfolio body.
    pub async fn with_portfolio(name: &str, portfolio: &str) -> Self {
        let general = serde_json::json!({ "name": name }).to_string();
        Self::start(Document::ok(&general), Document::ok(portfolio)).await
    }

    pub fn general_info_url(&self) -> String {
        format!("http://{}/general.json", self.addr)
    }

    pub fn portfolio_url(&self) -> String {
        format!("http://{}/portfolio.json", self.addr)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            general_info: self.general_info_url(),
            portfolio: self.portfolio_url(),
        }
    }

    pub fn general_info_hits(&self) -> usize {
        self.state.general_info_hits.load(Ordering::SeqCst)
    }

    pub fn portfolio_hits(&self) -> usize {
        self.state.portfolio_hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeOrigin {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn serve_general_info(State(state): State<Arc<OriginState>>) -> Response {
    state.general_info_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(rendezvous) = &state.rendezvous {
        rendezvous.wait().await;
    }
    respond(&state.general_info)
}

async fn serve_portfolio(State(state): State<Arc<OriginState>>) -> Response {
    state.portfolio_hits.fetch_add(1, Ordering::SeqCst);
    if let Some(rendezvous) = &state.rendezvous {
        rendezvous.wait().await;
    }
    respond(&state.portfolio)
}

fn respond(doc: &Document) -> Response {
    let status = StatusCode::from_u16(doc.status).expect("invalid status code");
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        doc.body.clone(),
    )
        .into_response()
}

/// Runs the `showcase` binary to completion (blocking).
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    let mut command = std::process::Command::new(env!("CARGO_BIN_EXE_showcase"));
    command.args(args);
    for var in SHOWCASE_ENV {
        command.env_remove(var);
    }
    command.output().expect("failed to run showcase")
}

/// Runs the `showcase` binary to completion without blocking the runtime,
/// so an in-process [`FakeOrigin`] keeps serving.
#[allow(clippy::missing_panics_doc)]
pub async fn run_command(args: &[&str]) -> Output {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_showcase"));
    command.args(args).kill_on_drop(true);
    for var in SHOWCASE_ENV {
        command.env_remove(var);
    }
    tokio::time::timeout(std::time::Duration::from_secs(30), command.output())
        .await
        .expect("showcase did not finish in time")
        .expect("failed to run showcase")
}
