//! fetchcache - a disk-backed response cache for JSON HTTP APIs
//!
//! Given a base URL and a storage directory, [`fetcher::CachedFetcher`]
//! fetches JSON resources over HTTP, persists each response as a data +
//! metadata file pair, and serves subsequent identical requests from disk
//! until the optional freshness window expires. When a refetch fails, the
//! previously cached response is served as a fallback.

pub mod cache;
pub mod cli;
pub mod fetcher;
