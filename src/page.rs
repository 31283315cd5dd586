//! The render operation.
//!
//! Fetches both documents concurrently, waits for both, then derives the
//! display tree. If either fetch fails the whole render fails; there is no
//! page with one dataset missing.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::schema::SiteContent;
use crate::error::{FetchError, ShowcaseError};
use crate::fetch::DataSource;
use crate::markup::render_markup;
use crate::observability::metrics::{self, RenderOutcome};
use crate::view::{PageView, build_page};

/// Fetches both documents and builds the page.
///
/// # Errors
///
/// Returns the first [`FetchError`] produced by either fetch.
pub async fn render_page(
    source: &dyn DataSource,
    content: &SiteContent,
) -> Result<PageView, FetchError> {
    let started = Instant::now();

    let fetched = tokio::try_join!(source.fetch_general_info(), source.fetch_portfolio());

    let (general_info, portfolio) = match fetched {
        Ok(documents) => documents,
        Err(e) => {
            warn!(error = %e, "render aborted");
            metrics::record_render(RenderOutcome::FetchFailed);
            return Err(e);
        }
    };

    let page = build_page(&general_info, &portfolio, content);

    info!(
        cards = page.projects.cards.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "page rendered"
    );
    metrics::record_render(RenderOutcome::Rendered);
    Ok(page)
}

/// Fetches, builds, and serializes the page into an HTML document.
///
/// # Errors
///
/// Returns [`ShowcaseError::Fetch`] if either document cannot be fetched
/// and [`ShowcaseError::Render`] if markup serialization fails.
pub async fn render_document(
    source: &dyn DataSource,
    content: &SiteContent,
) -> Result<String, ShowcaseError> {
    let page = render_page(source, content).await?;
    render_markup(&page).map_err(|e| {
        metrics::record_render(RenderOutcome::MarkupFailed);
        e.into()
    })
}
