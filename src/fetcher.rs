//! Cached JSON fetcher over HTTP
//!
//! This module provides `CachedFetcher`, which resolves a request path against
//! a base URL, decides whether to serve the response from disk or from the
//! network, and persists fresh responses through the cache store. A failed
//! network attempt falls back to the previously cached value when one exists.

use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::cache::CacheStore;

/// Errors that can occur when fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level (connection, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server responded with a non-success status code
    #[error("server responded with status {0}")]
    Status(StatusCode),

    /// Response body was not valid JSON
    #[error("failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing the cache entry to disk failed
    #[error("failed to persist cache entry: {0}")]
    Persist(#[from] std::io::Error),
}

/// Passthrough parameters for the network call
///
/// Defaults to a GET request with no extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method to use
    pub method: Method,
    /// Extra headers to send with the request
    pub headers: HeaderMap,
}

/// Fetches JSON resources over HTTP with a disk-backed cache
///
/// Construction fixes the base URL, the storage root, and an optional maximum
/// entry age in seconds. Without a maximum age, an entry once written is
/// served from disk forever. With one, a stale or unverifiable entry triggers
/// a refetch, and the stale copy still serves as a fallback if that refetch
/// fails.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    client: Client,
    base_url: String,
    store: CacheStore,
    max_age_seconds: Option<u64>,
}

impl CachedFetcher {
    /// Creates a fetcher for the given base URL, storing cache entries under
    /// `cache_dir`
    pub fn new(base_url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            store: CacheStore::new(cache_dir),
            max_age_seconds: None,
        }
    }

    /// Sets the freshness window: entries older than this many seconds are
    /// refetched
    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age_seconds = Some(seconds);
        self
    }

    /// Replaces the HTTP client, e.g. to configure timeouts or a proxy
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Fetches the resource at `request_path`, serving from cache when the
    /// entry is still fresh
    ///
    /// `request_path` is appended to the base URL to form the request target
    /// and also identifies the cache entry; `sub_folder` namespaces the entry
    /// under the storage root.
    ///
    /// # Returns
    /// * `Ok(Value)` - the fresh response, a cache hit, or a fallback to the
    ///   last cached response after a failed refetch
    /// * `Err(FetchError)` - the network attempt failed and no usable cached
    ///   copy exists; the error is the network-path failure, never the
    ///   fallback's
    pub async fn fetch(
        &self,
        request_path: &str,
        sub_folder: &str,
        options: Option<RequestOptions>,
    ) -> Result<Value, FetchError> {
        if let Some(value) = self.cached_value(sub_folder, request_path) {
            return Ok(value);
        }

        match self.fetch_remote(request_path, options).await {
            Ok(value) => {
                self.store.write(sub_folder, request_path, &value)?;
                Ok(value)
            }
            // Any network-path failure falls back to the cached copy if one
            // parses; otherwise the original error surfaces.
            Err(err) => self.store.read_data(sub_folder, request_path).ok_or(err),
        }
    }

    /// Returns the cached value when the entry qualifies as a hit
    ///
    /// Without a freshness window any parsable data artifact is a hit. With
    /// one, the entry must have a readable metadata artifact younger than the
    /// window; missing or corrupt metadata counts as stale.
    fn cached_value(&self, sub_folder: &str, request_path: &str) -> Option<Value> {
        match self.max_age_seconds {
            None => self.store.read_data(sub_folder, request_path),
            Some(max_age) => {
                if !self.store.data_path(sub_folder, request_path).exists() {
                    return None;
                }
                let meta = self.store.read_meta(sub_folder, request_path)?;
                let age = Utc::now().signed_duration_since(meta.last_fetched);
                if age.num_seconds() < max_age as i64 {
                    self.store.read_data(sub_folder, request_path)
                } else {
                    None
                }
            }
        }
    }

    /// Performs the network request and parses the body as JSON
    async fn fetch_remote(
        &self,
        request_path: &str,
        options: Option<RequestOptions>,
    ) -> Result<Value, FetchError> {
        let url = join_url(&self.base_url, request_path);
        let options = options.unwrap_or_default();

        let response = self
            .client
            .request(options.method, &url)
            .headers(options.headers)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text)?;
        Ok(value)
    }
}

/// Joins a base URL and a request path with exactly one `/` between them
fn join_url(base_url: &str, request_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        request_path.trim_start_matches('/')
    )
}
