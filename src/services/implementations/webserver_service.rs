use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::services::Service;
use crate::snapshots::SnapshotStore;

/// HTTP API server
pub struct WebserverService {
    store: Arc<SnapshotStore>,
}

impl WebserverService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Service for WebserverService {
    fn name(&self) -> &'static str {
        "webserver"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.webserver.enabled
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        let store = Arc::clone(&self.store);

        // start_server blocks until shutdown, so it runs in its own task;
        // the service shutdown signal is forwarded to the server's notify.
        let server_handle = tokio::spawn(async move {
            if let Err(e) = crate::webserver::start_server(store).await {
                logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
            }
        });

        let forward_handle = tokio::spawn(async move {
            shutdown.notified().await;
            crate::webserver::shutdown();
        });

        Ok(vec![server_handle, forward_handle])
    }
}
