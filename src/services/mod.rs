//! Service lifecycle management
//!
//! Long-running subsystems (sync scheduler, webserver) implement the
//! Service trait and are started in priority order by the ServiceManager,
//! which also owns the shared shutdown Notify and joins every task handle
//! on the way down.

pub mod implementations;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::logger::{self, LogTag};

/// Core service trait that all services must implement
#[async_trait]
pub trait Service: Send + Sync {
    /// Unique service identifier
    fn name(&self) -> &'static str;

    /// Service priority (lower = starts earlier, stops later)
    fn priority(&self) -> i32 {
        100
    }

    /// Check if service is enabled in configuration
    fn is_enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Start the service, returning the spawned task handles
    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String>;
}

pub struct ServiceManager {
    services: Vec<Box<dyn Service>>,
    handles: HashMap<&'static str, Vec<JoinHandle<()>>>,
    shutdown: Arc<Notify>,
    config: Config,
}

impl ServiceManager {
    pub fn new(config: Config) -> Self {
        Self {
            services: Vec::new(),
            handles: HashMap::new(),
            shutdown: Arc::new(Notify::new()),
            config,
        }
    }

    /// Register a service
    pub fn register(&mut self, service: Box<dyn Service>) {
        self.services.push(service);
    }

    /// Start all enabled services in priority order
    pub async fn start_all(&mut self) -> Result<(), String> {
        logger::info(LogTag::System, "Starting all services...");

        self.services.sort_by_key(|s| s.priority());

        for service in &mut self.services {
            let name = service.name();
            if !service.is_enabled(&self.config) {
                logger::info(LogTag::System, &format!("Service disabled: {}", name));
                continue;
            }

            logger::info(LogTag::System, &format!("Starting service: {}", name));
            let handles = service.start(self.shutdown.clone()).await?;
            logger::info(
                LogTag::System,
                &format!("Service started: {} ({} handles)", name, handles.len()),
            );
            self.handles.insert(name, handles);
        }

        Ok(())
    }

    /// Signal shutdown and wait for every service task to finish
    pub async fn shutdown_all(&mut self) {
        logger::info(LogTag::System, "Shutting down all services...");
        self.shutdown.notify_waiters();

        for (name, handles) in self.handles.drain() {
            for handle in handles {
                if let Err(e) = handle.await {
                    logger::warning(
                        LogTag::System,
                        &format!("Service task {} ended abnormally: {}", name, e),
                    );
                }
            }
        }

        logger::info(LogTag::System, "All services stopped");
    }

    /// Names of registered services that are enabled
    pub fn enabled_services(&self) -> Vec<&'static str> {
        self.services
            .iter()
            .filter(|s| s.is_enabled(&self.config))
            .map(|s| s.name())
            .collect()
    }
}
