//! HTTP client for the remote recipe catalog.
//!
//! Every fetch bypasses HTTP caching: the client sends `no-cache` request
//! headers so an intermediate cache never answers with a stored copy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, info};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Location of the published recipe catalog
pub const REMOTE_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/wanzi215/WatchBookBeginnerSource/master/Recipes.json";

/// Anything that can produce the raw bytes of a catalog document.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, ApiError>;
}

/// Fetches the catalog document over HTTPS.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    /// Create a client for the published catalog URL
    pub fn new() -> Result<Self, ApiError> {
        Self::with_url(REMOTE_CATALOG_URL, None)
    }

    /// Create a client for a custom URL.
    ///
    /// Without a timeout the transport default applies.
    pub fn with_url(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().default_headers(Self::no_cache_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn no_cache_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));
        headers
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch(&self) -> Result<Vec<u8>, ApiError> {
        info!(url = %self.url, "Fetching recipe catalog");

        let response = self.client.get(&self.url).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.bytes().await?;

        if body.is_empty() {
            return Err(ApiError::EmptyBody);
        }

        debug!(bytes = body.len(), "Catalog response received");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cache_headers() {
        let headers = CatalogClient::no_cache_headers();
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    }

    #[test]
    fn test_default_url() {
        let client = CatalogClient::new().unwrap();
        assert_eq!(client.url(), REMOTE_CATALOG_URL);

        let custom = CatalogClient::with_url("https://example.com/r.json", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(custom.url(), "https://example.com/r.json");
    }
}
