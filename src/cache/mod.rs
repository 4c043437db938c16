//! Cache module for persisting API responses to disk
//!
//! This module provides the on-disk half of the cache: a store that maps a
//! (sub-folder, request path) pair to a data artifact and a metadata artifact,
//! plus the filename sanitization that derives the file identity from the
//! request path. Freshness decisions live in the fetcher; the store only
//! reads and writes artifacts, degrading to `None` on missing or corrupt
//! files so callers can refetch.

mod sanitize;
mod store;

pub use sanitize::sanitize;
pub use store::{CacheStore, EntryMeta};
