//! JSON GET client shared by the sport adapters.
//!
//! Every failure mode (transport errors, timeouts, non-2xx statuses, rate
//! limiting, malformed bodies) degrades to the empty payload. Callers
//! treat an empty result as "no data available", never as an error, so a
//! page always renders even with the upstream down.

pub mod cache;

pub use cache::ResponseCache;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Failure classes for one upstream request. All of them are absorbed by
/// [`UpstreamClient::get`]; the taxonomy exists so degraded responses log
/// with the right shape.
#[derive(Debug, Error)]
enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rate limited")]
    RateLimited,
    #[error("status {0}")]
    Status(StatusCode),
    #[error("bad request url: {0}")]
    Url(#[from] url::ParseError),
}

/// HTTP client for one upstream provider, with a TTL response cache.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    auth_header: Option<String>,
    cache: ResponseCache,
    name: &'static str,
}

impl UpstreamClient {
    pub fn new(
        name: &'static str,
        base_url: &str,
        auth_header: Option<String>,
        timeout: Duration,
        cache_ttl: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(UpstreamClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
            cache: ResponseCache::new(cache_ttl),
            name,
        })
    }

    /// The well-shaped empty result returned when upstream data is
    /// unavailable for any reason.
    pub fn empty_payload() -> Value {
        serde_json::json!({ "data": [], "meta": {} })
    }

    /// GET `path` with the given query parameters.
    ///
    /// Checks the cache first; on a miss, fetches and caches. A rate-limited
    /// or failed fetch falls back to the last cached value for the key if
    /// one exists, the empty payload otherwise. Never returns an error.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Value {
        let key = cache_key(path, params);
        if let Some(hit) = self.cache.fresh(&key).await {
            return hit;
        }

        match self.fetch(path, params).await {
            Ok(value) => {
                self.cache.store(&key, value.clone()).await;
                value
            }
            Err(FetchError::RateLimited) => {
                warn!("{}: rate limited on {}", self.name, path);
                self.cached_or_empty(&key).await
            }
            Err(e) => {
                warn!("{}: GET {} failed: {}", self.name, path, e);
                self.cached_or_empty(&key).await
            }
        }
    }

    async fn cached_or_empty(&self, key: &str) -> Value {
        match self.cache.stale(key).await {
            Some(value) => value,
            None => Self::empty_payload(),
        }
    }

    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = Url::parse_with_params(
            &format!("{}{}", self.base_url, path),
            params.iter().map(|(k, v)| (*k, v.as_str())),
        )?;
        debug!("GET {}", url);

        let mut req = self.http.get(url);
        if let Some(header) = &self.auth_header {
            req = req.header(AUTHORIZATION, header);
        }
        let resp = req.send().await?;

        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        Ok(resp.json().await?)
    }
}

/// Stable cache key: path plus query pairs sorted by key then value, so
/// equivalent requests with different parameter order share an entry.
fn cache_key(path: &str, params: &[(&str, String)]) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    format!("{}?{}", path, pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_ignores_parameter_order() {
        let a = cache_key(
            "/games",
            &[("per_page", "100".into()), ("dates[]", "2025-01-05".into())],
        );
        let b = cache_key(
            "/games",
            &[("dates[]", "2025-01-05".into()), ("per_page", "100".into())],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_keeps_repeated_parameters() {
        // Head-to-head queries pass team_ids[] twice.
        let key = cache_key(
            "/games",
            &[("team_ids[]", "14".into()), ("team_ids[]", "2".into())],
        );
        assert!(key.contains("team_ids[]=14"));
        assert!(key.contains("team_ids[]=2"));
    }

    #[test]
    fn empty_payload_is_well_shaped() {
        let empty = UpstreamClient::empty_payload();
        assert!(empty["data"].as_array().unwrap().is_empty());
        assert!(empty["meta"].as_object().unwrap().is_empty());
    }
}
