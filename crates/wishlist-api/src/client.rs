use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ItemDraft, ItemId, ItemPatch, WishlistItem};
use crate::query::ListRequest;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

#[derive(Error, Debug)]
pub enum WishlistError {
    #[error("API request failed: status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WishlistError>;

/// HTTP client for the wishlist API
///
/// Every call is a single attempt. Timeouts are whatever the transport
/// defaults to unless one is configured explicitly.
#[derive(Debug, Clone)]
pub struct WishlistClient {
    client: reqwest::Client,
    base_url: String,
}

impl WishlistClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::build(base_url, None)
    }

    /// Client with an explicit per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(WishlistError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "wishlist/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the collection, filtered per the request descriptor
    pub async fn list(&self, request: &ListRequest) -> Result<Vec<WishlistItem>> {
        let url = self.url(request.path());
        debug!("GET {} {:?}", url, request.params());

        let mut builder = self.client.get(&url);
        if !request.params().is_empty() {
            builder = builder.query(request.params());
        }

        let response = check_status(builder.send().await?, None).await?;
        let body = response.text().await?;
        let items: Vec<WishlistItem> = serde_json::from_str(&body)?;

        debug!("Fetched {} items", items.len());
        Ok(items)
    }

    /// Get a single item by id
    pub async fn get(&self, id: ItemId) -> Result<WishlistItem> {
        let url = self.url(&format!("/wishlist/{}", id));
        debug!("GET {}", url);

        let response = check_status(self.client.get(&url).send().await?, Some(id)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Create an item. The created item in the response is not used;
    /// callers refetch the list instead.
    pub async fn create(&self, draft: &ItemDraft) -> Result<()> {
        let url = self.url("/wishlist/");
        debug!("POST {} name={:?}", url, draft.name);

        check_status(self.client.post(&url).json(draft).send().await?, None).await?;
        Ok(())
    }

    pub async fn delete(&self, id: ItemId) -> Result<()> {
        let url = self.url(&format!("/wishlist/{}", id));
        debug!("DELETE {}", url);

        check_status(self.client.delete(&url).send().await?, Some(id)).await?;
        Ok(())
    }

    /// Send a partial update. Only the fields set on the patch are sent.
    pub async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<()> {
        let url = self.url(&format!("/wishlist/{}", id));
        debug!("PATCH {} {:?}", url, patch);

        check_status(self.client.patch(&url).json(patch).send().await?, Some(id)).await?;
        Ok(())
    }

    /// Ping the backend health endpoint
    pub async fn health(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct Health {
            status: String,
        }

        let url = self.url("/health");
        debug!("GET {}", url);

        let response = check_status(self.client.get(&url).send().await?, None).await?;
        let body = response.text().await?;
        let health: Health = serde_json::from_str(&body)?;
        Ok(health.status == "healthy")
    }
}

/// Map non-2xx responses to errors. A 404 on an item path becomes NotFound.
async fn check_status(
    response: reqwest::Response,
    item: Option<ItemId>,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        if let Some(id) = item {
            warn!("Item {} not found on server", id);
            return Err(WishlistError::NotFound(id));
        }
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Request failed with status {}: {}", status, body);
    Err(WishlistError::RequestFailed { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = WishlistClient::with_base_url("localhost:8000/api");
        assert!(matches!(result, Err(WishlistError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = WishlistClient::with_base_url("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/wishlist/"), "http://localhost:8000/api/wishlist/");
    }

    #[test]
    fn test_default_base() {
        let client = WishlistClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_BASE);
    }
}
