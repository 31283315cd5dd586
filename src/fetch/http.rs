//! HTTP data source.
//!
//! Issues one plain GET per document: no custom headers, no query
//! parameters, no retry, no timeout, no caching.

use std::time::Instant;

use tracing::debug;

use super::{DataSource, GeneralInfo, PortfolioMapping, Result, decode_general_info, decode_portfolio};
use crate::config::schema::Endpoints;
use crate::error::{FetchError, Resource};
use crate::observability::metrics;

/// Creates the HTTP client shared by every render.
///
/// # Errors
///
/// Returns the client builder's error if the TLS backend cannot be
/// initialized.
pub fn create_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}

/// [`DataSource`] backed by two configured HTTP(S) endpoints.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpDataSource {
    /// Creates a data source with its own client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the client cannot be built.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        Ok(Self::with_client(create_http_client()?, endpoints))
    }

    /// Creates a data source that reuses an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Returns the configured endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GETs one document and returns its body.
    async fn get(&self, resource: Resource, url: &str) -> Result<Vec<u8>> {
        debug!(resource = resource.as_label(), url, "fetching document");
        let started = Instant::now();

        let outcome = self.get_inner(resource, url).await;
        metrics::record_fetch(resource, started.elapsed());
        if let Err(ref e) = outcome {
            metrics::record_fetch_failure(resource, e.kind());
            debug!(resource = resource.as_label(), error = %e, "fetch failed");
        }
        outcome
    }

    async fn get_inner(&self, resource: Resource, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(
            resource = resource.as_label(),
            bytes = body.len(),
            "document received"
        );
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_general_info(&self) -> Result<GeneralInfo> {
        let body = self
            .get(Resource::GeneralInfo, &self.endpoints.general_info)
            .await?;
        decode_general_info(&body)
    }

    async fn fetch_portfolio(&self) -> Result<PortfolioMapping> {
        let body = self
            .get(Resource::Portfolio, &self.endpoints.portfolio)
            .await?;
        decode_portfolio(&body)
    }
}
