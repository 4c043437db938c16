//! On-disk cache entry storage
//!
//! Provides a `CacheStore` that persists one JSON response per cache entry as
//! a pair of files: the raw data artifact and a small metadata artifact
//! recording when the data was last fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use super::sanitize;

/// Metadata artifact stored next to each data artifact
///
/// Serialized as `{"lastFetched": "<ISO-8601 UTC timestamp>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMeta {
    /// When the data artifact was last written
    #[serde(rename = "lastFetched")]
    pub last_fetched: DateTime<Utc>,
}

/// Manages reading and writing cache entries on disk
///
/// Each entry is identified by a sub-folder name and a request path; the
/// request path is sanitized into the file name. The on-disk layout is:
///
/// ```text
/// <root>/<sub_folder>/<sanitized(request_path)>.json        -- raw JSON response
/// <root>/<sub_folder>/<sanitized(request_path)>.meta.json   -- {"lastFetched": ...}
/// ```
///
/// Reads degrade gracefully: a missing or unparsable file yields `None`,
/// leaving the refetch-or-fail decision to the caller. Entries are
/// overwritten whole on refresh and never deleted by this store.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory under which all sub-folders live
    root: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at the given directory
    ///
    /// The directory does not need to exist yet; it is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path of the data artifact for the given entry
    pub fn data_path(&self, sub_folder: &str, request_path: &str) -> PathBuf {
        self.root
            .join(sub_folder)
            .join(format!("{}.json", sanitize(request_path)))
    }

    /// Returns the path of the metadata artifact for the given entry
    pub fn meta_path(&self, sub_folder: &str, request_path: &str) -> PathBuf {
        self.root
            .join(sub_folder)
            .join(format!("{}.meta.json", sanitize(request_path)))
    }

    /// Reads and parses the data artifact for the given entry
    ///
    /// Returns `None` if the file does not exist or does not parse as JSON.
    pub fn read_data(&self, sub_folder: &str, request_path: &str) -> Option<Value> {
        let content = fs::read_to_string(self.data_path(sub_folder, request_path)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Reads and parses the metadata artifact for the given entry
    ///
    /// Returns `None` if the file is missing or corrupt, which callers treat
    /// as "freshness unknown".
    pub fn read_meta(&self, sub_folder: &str, request_path: &str) -> Option<EntryMeta> {
        let content = fs::read_to_string(self.meta_path(sub_folder, request_path)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persists a fetched value as the entry's data artifact and stamps the
    /// metadata artifact with the current time
    ///
    /// Creates the sub-folder directory if it does not exist. Both files are
    /// replaced whole, so a refresh fully overwrites the previous entry.
    pub fn write(
        &self,
        sub_folder: &str,
        request_path: &str,
        value: &Value,
    ) -> std::io::Result<()> {
        fs::create_dir_all(self.root.join(sub_folder))?;

        let data = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.data_path(sub_folder, request_path), data)?;

        let meta = EntryMeta {
            last_fetched: Utc::now(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.meta_path(sub_folder, request_path), meta_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::new(temp_dir.path());
        (store, temp_dir)
    }

    #[test]
    fn test_write_creates_both_artifacts() {
        let (store, temp_dir) = create_test_store();
        let value = json!({"id": 1, "title": "hello"});

        store
            .write("photo", "/photos/1?t=12", &value)
            .expect("Write should succeed");

        let data_path = temp_dir.path().join("photo").join("photos_1_t=12.json");
        let meta_path = temp_dir.path().join("photo").join("photos_1_t=12.meta.json");
        assert!(data_path.exists(), "Data artifact should exist");
        assert!(meta_path.exists(), "Metadata artifact should exist");

        let content = fs::read_to_string(&meta_path).expect("Should read metadata");
        assert!(content.contains("lastFetched"));
    }

    #[test]
    fn test_write_creates_sub_folder_if_missing() {
        let (store, temp_dir) = create_test_store();

        store
            .write("deeply/nested", "item", &json!(1))
            .expect("Write should succeed");

        assert!(temp_dir.path().join("deeply/nested").exists());
    }

    #[test]
    fn test_read_data_returns_none_for_missing_entry() {
        let (store, _temp_dir) = create_test_store();

        assert!(store.read_data("photo", "nope").is_none());
        assert!(store.read_meta("photo", "nope").is_none());
    }

    #[test]
    fn test_read_data_roundtrips_written_value() {
        let (store, _temp_dir) = create_test_store();
        let value = json!({"items": [1, 2, 3], "next": null});

        store.write("api", "/items", &value).expect("Write should succeed");

        let read = store.read_data("api", "/items").expect("Should read data");
        assert_eq!(read, value);
    }

    #[test]
    fn test_read_data_returns_none_for_corrupt_artifact() {
        let (store, _temp_dir) = create_test_store();
        store.write("api", "/items", &json!(1)).expect("Write should succeed");

        fs::write(store.data_path("api", "/items"), "{ not json").expect("Should write");

        assert!(store.read_data("api", "/items").is_none());
    }

    #[test]
    fn test_read_meta_returns_none_for_corrupt_artifact() {
        let (store, _temp_dir) = create_test_store();
        store.write("api", "/items", &json!(1)).expect("Write should succeed");

        fs::write(store.meta_path("api", "/items"), "oops").expect("Should write");

        assert!(store.read_meta("api", "/items").is_none());
    }

    #[test]
    fn test_last_fetched_timestamp_is_recorded() {
        let (store, _temp_dir) = create_test_store();

        let before = Utc::now();
        store.write("api", "/items", &json!(1)).expect("Write should succeed");
        let after = Utc::now();

        let meta = store.read_meta("api", "/items").expect("Should read metadata");
        assert!(meta.last_fetched >= before, "lastFetched should be after write started");
        assert!(meta.last_fetched <= after, "lastFetched should be before write finished");
    }

    #[test]
    fn test_overwrite_replaces_existing_entry() {
        let (store, _temp_dir) = create_test_store();

        store.write("api", "/items", &json!({"v": 1})).expect("First write should succeed");
        let first_meta = store.read_meta("api", "/items").expect("Should read metadata");

        store.write("api", "/items", &json!({"v": 2})).expect("Second write should succeed");

        let read = store.read_data("api", "/items").expect("Should read data");
        assert_eq!(read, json!({"v": 2}), "Entry should contain latest data");

        let second_meta = store.read_meta("api", "/items").expect("Should read metadata");
        assert!(second_meta.last_fetched >= first_meta.last_fetched);
    }

    #[test]
    fn test_paths_derive_from_sanitized_request_path() {
        let (store, temp_dir) = create_test_store();

        let data = store.data_path("photo", "/photos/1?t=12");
        let meta = store.meta_path("photo", "/photos/1?t=12");

        assert_eq!(data, temp_dir.path().join("photo").join("photos_1_t=12.json"));
        assert_eq!(meta, temp_dir.path().join("photo").join("photos_1_t=12.meta.json"));
    }
}
