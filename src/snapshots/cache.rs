/// In-memory cache for parsed snapshot contents
///
/// Thread-safe, keyed by filename. Snapshot files are immutable once
/// written, so entries never expire. Tracks metrics for monitoring.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::types::ProtocolRecord;

/// Cache metrics for monitoring
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Snapshot content cache
///
/// Values are shared via Arc so route handlers and the scheduler can hold
/// the same parsed snapshot without cloning record lists.
pub struct SnapshotCache {
    entries: RwLock<HashMap<String, Arc<Vec<ProtocolRecord>>>>,
    metrics: RwLock<CacheMetrics>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            metrics: RwLock::new(CacheMetrics::default()),
        }
    }

    /// Look up a cached snapshot by filename
    pub fn get(&self, filename: &str) -> Option<Arc<Vec<ProtocolRecord>>> {
        let found = self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(filename).cloned());

        if let Ok(mut metrics) = self.metrics.write() {
            if found.is_some() {
                metrics.hits += 1;
            } else {
                metrics.misses += 1;
            }
        }

        found
    }

    /// Insert a parsed snapshot
    pub fn insert(&self, filename: &str, records: Arc<Vec<ProtocolRecord>>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(filename.to_string(), records);
        }
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.inserts += 1;
        }
    }

    /// Number of cached snapshots
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current metrics
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = SnapshotCache::new();
        assert!(cache.get("a.json").is_none());

        cache.insert("a.json", Arc::new(vec![]));
        assert!(cache.get("a.json").is_some());

        let metrics = cache.metrics();
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.inserts, 1);
    }

    #[test]
    fn test_hit_rate() {
        let cache = SnapshotCache::new();
        cache.insert("a.json", Arc::new(vec![]));
        cache.get("a.json");
        cache.get("b.json");
        assert!((cache.metrics().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shared_value_identity() {
        let cache = SnapshotCache::new();
        let records = Arc::new(vec![ProtocolRecord::test_record("a", "lending", Some(1.0))]);
        cache.insert("a.json", Arc::clone(&records));

        let cached = cache.get("a.json").unwrap();
        assert!(Arc::ptr_eq(&records, &cached));
    }
}
