use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::services::Service;
use crate::snapshots::SnapshotStore;

/// Daily snapshot fetch scheduler
pub struct SyncService {
    store: Arc<SnapshotStore>,
}

impl SyncService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Service for SyncService {
    fn name(&self) -> &'static str {
        "sync"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.sync.enabled
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        logger::info(LogTag::Sync, "Starting scheduled sync service...");
        let handle = crate::sync::start_sync_service(shutdown, Arc::clone(&self.store));
        Ok(vec![handle])
    }
}
