/// Shared application state for the webserver
///
/// Holds the snapshot store handle and startup metadata that route
/// handlers need.
use std::sync::Arc;

use crate::snapshots::SnapshotStore;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Snapshot persistence layer
    pub store: Arc<SnapshotStore>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            store,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uptime_starts_at_zero() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SnapshotStore::new(dir.path().to_path_buf()));
        let state = AppState::new(store);
        assert!(state.uptime_seconds() < 2);
    }
}
