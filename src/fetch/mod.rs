//! Remote document fetching.
//!
//! The page is built from two independent JSON documents: the General Info
//! record and the Portfolio Mapping. [`DataSource`] is the seam between the
//! render pipeline and wherever those documents come from; [`HttpDataSource`]
//! is the production implementation.
//!
//! Bodies are decoded into typed shapes at this boundary. A body that does
//! not match is reported as [`FetchError::InvalidPayload`], the same failure
//! category as a non-success status, so malformed data never reaches the
//! view.

pub mod http;

pub use http::{HttpDataSource, create_http_client};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Resource};

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

// ============================================================================
// Documents
// ============================================================================

/// The profile record shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    /// Display name
    pub name: String,
}

/// Project name → project URL, in source document order.
///
/// The order of entries is the display order. Keys are unique; a key that
/// appears twice in the source keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioMapping(IndexMap<String, String>);

impl PortfolioMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates `(name, url)` pairs in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Looks up the URL of a project.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PortfolioMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Data Source
// ============================================================================

/// Supplier of the two documents a page is built from.
///
/// Each call is independent: implementations must not cache or share
/// in-flight requests between callers.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the General Info document.
    async fn fetch_general_info(&self) -> Result<GeneralInfo>;

    /// Fetches the Portfolio Mapping document.
    async fn fetch_portfolio(&self) -> Result<PortfolioMapping>;
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a General Info body.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPayload`] if the body is not a JSON object
/// with a string `name`.
pub fn decode_general_info(body: &[u8]) -> Result<GeneralInfo> {
    decode(Resource::GeneralInfo, body)
}

/// Decodes a Portfolio Mapping body.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPayload`] if the body is not a JSON object
/// whose values are all strings.
pub fn decode_portfolio(body: &[u8]) -> Result<PortfolioMapping> {
    decode(Resource::Portfolio, body)
}

fn decode<T: serde::de::DeserializeOwned>(resource: Resource, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| FetchError::InvalidPayload {
        resource,
        message: e.to_string(),
    })
}
