//! Snapshot file store
//!
//! Owns the data directory: writes a new timestamped JSON file per sync,
//! reads files back through the in-memory cache, and lists what is on disk
//! newest first. Files whose names do not parse as a timestamp are skipped
//! with a warning; they never abort a listing.

use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::SnapshotError;
use crate::logger::{self, LogTag};

use super::cache::{CacheMetrics, SnapshotCache};
use super::date_parse::parse_snapshot_date;
use super::selector::sort_newest_first;
use super::types::{ProtocolRecord, SnapshotMeta};

/// Snapshot file store with read-through cache
pub struct SnapshotStore {
    data_dir: PathBuf,
    cache: SnapshotCache,
}

impl SnapshotStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            cache: SnapshotCache::new(),
        }
    }

    /// Store rooted at the configured data directory
    pub fn from_default_paths() -> Self {
        Self::new(crate::paths::get_data_directory())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write a fetched protocol list as a new timestamped snapshot
    ///
    /// File name is the capture time in local time, `YYYY-MM-DD HH_MM.json`,
    /// matching what the date parser reads back. Payload is compact JSON.
    pub fn save(&self, records: &[ProtocolRecord]) -> Result<PathBuf, SnapshotError> {
        let filename = format!("{}.json", Local::now().format("%Y-%m-%d %H_%M"));
        let path = self.data_dir.join(&filename);

        let payload = serde_json::to_string(records).map_err(|e| SnapshotError::Parse {
            name: filename.clone(),
            source: e,
        })?;

        std::fs::write(&path, payload).map_err(|e| SnapshotError::Io {
            name: filename.clone(),
            source: e,
        })?;

        self.cache
            .insert(&filename, Arc::new(records.to_vec()));

        logger::info(
            LogTag::Snapshots,
            &format!("Snapshot saved -> {} ({} protocols)", filename, records.len()),
        );

        Ok(path)
    }

    /// Load a snapshot by filename, through the cache
    pub fn load(&self, filename: &str) -> Result<Arc<Vec<ProtocolRecord>>, SnapshotError> {
        if !is_safe_filename(filename) {
            return Err(SnapshotError::NotFound(filename.to_string()));
        }

        if let Some(records) = self.cache.get(filename) {
            logger::debug(
                LogTag::Snapshots,
                &format!("Cache hit for {}", filename),
            );
            return Ok(records);
        }

        let path = self.data_dir.join(filename);
        if !path.exists() {
            return Err(SnapshotError::NotFound(filename.to_string()));
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| SnapshotError::Io {
            name: filename.to_string(),
            source: e,
        })?;

        let records: Vec<ProtocolRecord> =
            serde_json::from_str(&raw).map_err(|e| SnapshotError::Parse {
                name: filename.to_string(),
                source: e,
            })?;

        let records = Arc::new(records);
        self.cache.insert(filename, Arc::clone(&records));

        logger::debug(
            LogTag::Snapshots,
            &format!("Loaded {} from disk ({} protocols)", filename, records.len()),
        );

        Ok(records)
    }

    /// List stored snapshots, newest first
    ///
    /// Unparseable filenames are skipped with a warning.
    pub fn list_meta(&self) -> Vec<SnapshotMeta> {
        let pattern = format!("{}/*.json", self.data_dir.display());
        let mut snapshots = Vec::new();

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                logger::error(
                    LogTag::Snapshots,
                    &format!("Bad glob pattern {}: {}", pattern, e),
                );
                return snapshots;
            }
        };

        for entry in paths.flatten() {
            let filename = match entry.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            match parse_snapshot_date(&filename) {
                Some(date) => snapshots.push(SnapshotMeta { filename, date }),
                None => {
                    logger::warning(
                        LogTag::Snapshots,
                        &format!("Skipping file with unparseable date: {}", filename),
                    );
                }
            }
        }

        sort_newest_first(snapshots)
    }

    /// Cache metrics for the health endpoint
    pub fn cache_metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

/// Reject anything that could escape the data directory
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_file(name: &str, contents: &str) -> (TempDir, SnapshotStore) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(name), contents).unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_save_then_list() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let records = vec![ProtocolRecord::test_record("a", "lending", Some(100.0))];
        let path = store.save(&records).unwrap();
        assert!(path.exists());

        let listed = store.list_meta();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].filename.ends_with(".json"));
    }

    #[test]
    fn test_load_uses_cache_after_save() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let records = vec![ProtocolRecord::test_record("a", "lending", Some(100.0))];
        let path = store.save(&records).unwrap();
        let filename = path.file_name().unwrap().to_str().unwrap().to_string();

        let loaded = store.load(&filename).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(store.cache_metrics().hits, 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let err = store.load("2025-01-01 00_00.json").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let (_dir, store) = store_with_file("2025-01-01 00_00.json", "{not json");
        let err = store.load("2025-01-01 00_00.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse { .. }));
    }

    #[test]
    fn test_listing_skips_unparseable_names() {
        let (dir, store) = store_with_file("2025-01-02 00_00.json", "[]");
        std::fs::write(dir.path().join("not_a_date.json"), "[]").unwrap();
        std::fs::write(dir.path().join("2025-01-01 00_00.json"), "[]").unwrap();

        let listed = store.list_meta();
        let names: Vec<&str> = listed.iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(names, vec!["2025-01-02 00_00.json", "2025-01-01 00_00.json"]);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());
        assert!(store.load("../../etc/passwd").unwrap_err().is_not_found());
        assert!(store.load("..\\secret.json").unwrap_err().is_not_found());
    }
}
