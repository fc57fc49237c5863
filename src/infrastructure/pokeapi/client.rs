/// PokeAPI HTTP client implementation
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, instrument};

use super::{rate_limiter::UpstreamRateLimiter, retry::RetryPolicy};
use crate::domain::errors::{CatalogError, CatalogResult, UpstreamError};
use crate::domain::models::listing::ListEnvelope;
use crate::domain::models::{Config, EntityRecord, ListWindow, ListingPage, ResourceKind};
use crate::domain::ports::CatalogClient;

/// Configuration for the PokeAPI client
#[derive(Debug, Clone)]
pub struct PokeApiClientConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2`
    pub base_url: String,

    /// User-Agent header
    pub user_agent: String,

    /// Rate limit in requests per second
    pub rate_limit_rps: u32,

    /// Token bucket burst capacity
    pub burst_size: u32,

    /// Maximum number of retries
    pub max_retries: u32,

    /// Initial backoff duration in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    pub max_backoff_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PokeApiClientConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PokeApiClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.upstream.base_url.clone(),
            user_agent: config.upstream.user_agent.clone(),
            rate_limit_rps: config.rate_limit.requests_per_second,
            burst_size: config.rate_limit.burst_size,
            max_retries: config.retry.max_retries,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            max_backoff_ms: config.retry.max_backoff_ms,
            timeout_secs: config.upstream.timeout_secs,
        }
    }
}

/// HTTP client for the PokeAPI catalog
///
/// Features:
/// - One pooled connection set reused by every request of a fan-out batch
/// - Token bucket rate limiting shared across concurrent requests
/// - Exponential backoff retry for transient errors
/// - 404 reported as `NotFound`, distinct from other upstream failures
#[derive(Debug)]
pub struct PokeApiClient {
    /// Reusable HTTP client with connection pooling
    http_client: ReqwestClient,

    /// API root without trailing slash
    base_url: String,

    /// Rate limiter to enforce request rate limits
    rate_limiter: UpstreamRateLimiter,

    /// Retry policy for handling transient errors
    retry_policy: RetryPolicy,
}

impl PokeApiClient {
    /// Create a client against the public PokeAPI with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(PokeApiClientConfig::default())
    }

    /// Create a client with custom configuration
    ///
    /// # Returns
    /// * `Err(anyhow::Error)` - Failed to build HTTP client
    pub fn with_config(config: PokeApiClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .pool_max_idle_per_host(64)
            .tcp_nodelay(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: UpstreamRateLimiter::new(config.rate_limit_rps, config.burst_size),
            retry_policy: RetryPolicy::new(
                config.max_retries,
                config.initial_backoff_ms,
                config.max_backoff_ms,
            ),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one rate-limited request and classify its status.
    ///
    /// Returns `Ok(None)` for 404 so each caller can decide what "absent"
    /// means for its operation.
    async fn send(
        &self,
        method: Method,
        url: &Url,
        query: &[(&str, String)],
    ) -> CatalogResult<Option<Response>> {
        self.rate_limiter.acquire().await;

        let response = self
            .http_client
            .request(method, url.clone())
            .query(query)
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(UpstreamError::Status { status, body }.into());
        }
        Ok(Some(response))
    }

    async fn get_body(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> CatalogResult<Option<Vec<u8>>> {
        match self.send(Method::GET, url, query).await? {
            Some(response) => {
                let body = response.bytes().await.map_err(UpstreamError::from)?;
                Ok(Some(body.to_vec()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    #[instrument(skip(self), fields(kind = %kind))]
    async fn fetch_entity(&self, kind: ResourceKind, key: &str) -> CatalogResult<EntityRecord> {
        let url = kind.entity_url(&self.base_url, key)?;
        let body = self
            .retry_policy
            .execute(|| self.get_body(&url, &[]))
            .await?
            .ok_or_else(|| CatalogError::not_found(kind, key))?;

        debug!(bytes = body.len(), "entity fetched");
        EntityRecord::decode(kind, &body)
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn fetch_list(
        &self,
        kind: ResourceKind,
        window: ListWindow,
    ) -> CatalogResult<ListingPage> {
        let url = kind.list_url(&self.base_url)?;
        let query = window.query();
        let body = self
            .retry_policy
            .execute(|| self.get_body(&url, &query))
            .await?
            .ok_or_else(|| CatalogError::not_found(kind, url.as_str()))?;

        let envelope: ListEnvelope = serde_json::from_slice(&body)
            .map_err(|err| CatalogError::malformed(kind, err.to_string()))?;
        let page = ListingPage::from(envelope);
        debug!(
            total_count = page.total_count,
            stubs = page.stubs.len(),
            "listing fetched"
        );
        Ok(page)
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn exists_entity(&self, kind: ResourceKind, name: &str) -> CatalogResult<bool> {
        let url = match kind.entity_url(&self.base_url, name) {
            Ok(url) => url,
            Err(err) if err.is_not_found() => return Ok(false),
            Err(err) => return Err(err),
        };
        let found = self
            .retry_policy
            .execute(|| async { Ok(self.send(Method::HEAD, &url, &[]).await?.is_some()) })
            .await?;
        debug!(found, "existence probed");
        Ok(found)
    }
}
