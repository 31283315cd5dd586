//! Metrics collection for `showcase`.
//!
//! Prometheus-compatible metrics for page requests, renders, and the two
//! outbound fetches. Every `record_*` function is a silent no-op until
//! [`init_metrics`] installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::{Resource, ShowcaseError};

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Routes served by the host. Anything else is bucketed as `"__unknown__"`
/// so request paths cannot inflate label cardinality.
const KNOWN_ROUTES: [&str; 1] = ["/"];

/// How a render invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Both documents fetched and the view was built.
    Rendered,
    /// A fetch failed; no view was built.
    FetchFailed,
    /// The view was built but markup serialization failed.
    MarkupFailed,
}

impl RenderOutcome {
    const fn as_label(self) -> &'static str {
        match self {
            Self::Rendered => "rendered",
            Self::FetchFailed => "fetch_failed",
            Self::MarkupFailed => "markup_failed",
        }
    }
}

/// Sanitizes a request path for use as a metrics label.
#[must_use]
pub fn sanitize_route_label(path: &str) -> &str {
    if KNOWN_ROUTES.contains(&path) {
        path
    } else {
        "__unknown__"
    }
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`.  When `None`, the recorder is installed without
/// an HTTP endpoint.
///
/// # Errors
///
/// Returns `ShowcaseError::Io` if the recorder or HTTP listener
/// cannot be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), ShowcaseError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| ShowcaseError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!(
        "showcase_requests_total",
        "Total number of HTTP requests by route and status"
    );
    describe_counter!(
        "showcase_renders_total",
        "Total number of render invocations by outcome"
    );
    describe_histogram!(
        "showcase_fetch_duration_ms",
        "Remote document fetch duration in milliseconds"
    );
    describe_counter!(
        "showcase_fetch_failures_total",
        "Remote document fetch failures by resource and kind"
    );
}

/// Records an HTTP request handled by the host.
pub fn record_request(path: &str, status: u16) {
    let route = sanitize_route_label(path);
    counter!(
        "showcase_requests_total",
        "route" => route.to_owned(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Records the outcome of a render invocation.
pub fn record_render(outcome: RenderOutcome) {
    counter!("showcase_renders_total", "outcome" => outcome.as_label()).increment(1);
}

/// Records the duration of one outbound fetch, successful or not.
pub fn record_fetch(resource: Resource, duration: Duration) {
    histogram!("showcase_fetch_duration_ms", "resource" => resource.as_label())
        .record(duration.as_secs_f64() * 1000.0);
}

/// Records a failed outbound fetch.
pub fn record_fetch_failure(resource: Resource, kind: &'static str) {
    counter!(
        "showcase_fetch_failures_total",
        "resource" => resource.as_label(),
        "kind" => kind,
    )
    .increment(1);
}
