//! Catalog provider: fetches the product list from the configured
//! endpoint.
//!
//! The catalog is read-only from this crate's point of view. Fetches are
//! retried with a linear backoff (the original web storefront silently
//! dropped fetch failures; here they surface as [`CatalogError`] after the
//! retry budget) and successful results are cached with a TTL.

pub mod filter;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use shopsphere_core::Product;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::StorefrontConfig;

const CACHE_KEY: &str = "catalog";

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned {status}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
    },

    /// Rate limited by the endpoint.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The payload was not a product list.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every attempt failed without a specific terminal error.
    #[error("catalog fetch failed after {attempts} attempt(s)")]
    Exhausted {
        /// Attempts made before giving up.
        attempts: u32,
    },
}

impl CatalogError {
    /// Whether retrying could help.
    fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) => true,
            Self::Status { status } => status.is_server_error(),
            Self::Parse(_) | Self::Exhausted { .. } => false,
        }
    }
}

/// The catalog payload: either a bare JSON array of products, or the
/// `{"products": [...]}` envelope the dummyjson endpoint returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    List(Vec<Product>),
    Envelope { products: Vec<Product> },
}

impl CatalogPayload {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::List(products) | Self::Envelope { products } => products,
        }
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog endpoint.
///
/// Cheaply cloneable; successful fetches are cached for the configured
/// TTL.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    retries: u32,
    retry_delay: Duration,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.catalog_url.clone(),
                retries: config.fetch_retries.max(1),
                retry_delay: config.fetch_retry_delay,
                cache,
            }),
        }
    }

    /// Fetch the product catalog.
    ///
    /// Transient failures (connection errors, 5xx, 429) are retried up to
    /// the configured budget with a linear backoff; a 429 sleeps for the
    /// advertised `Retry-After` instead. A malformed payload or client
    /// error fails immediately.
    ///
    /// # Errors
    ///
    /// Returns the last error once the retry budget is spent.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(CACHE_KEY).await {
            debug!("cache hit for catalog");
            return Ok((*products).clone());
        }

        let attempts = self.inner.retries;
        let mut last_err = None;

        for attempt in 1..=attempts {
            match self.fetch_once().await {
                Ok(products) => {
                    self.inner
                        .cache
                        .insert(CACHE_KEY, Arc::new(products.clone()))
                        .await;
                    return Ok(products);
                }
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(error = %e, attempt, "catalog fetch failed, retrying");
                    let delay = if let CatalogError::RateLimited(secs) = &e {
                        Duration::from_secs(*secs)
                    } else {
                        self.inner.retry_delay * attempt
                    };
                    tokio::time::sleep(delay).await;
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or(CatalogError::Exhausted { attempts }))
    }

    /// Drop the cached catalog so the next fetch hits the endpoint.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(CACHE_KEY).await;
    }

    async fn fetch_once(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if !status.is_success() {
            return Err(CatalogError::Status { status });
        }

        let text = response.text().await?;
        let payload: CatalogPayload = serde_json::from_str(&text)?;
        Ok(payload.into_products())
    }
}

// =============================================================================
// Category enumeration
// =============================================================================

/// Distinct category labels in catalog order.
///
/// The source for the UI's category selector, which prepends its own
/// "all" pseudo-category.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}
