// Startup orchestration using ServiceManager

use std::sync::Arc;

use crate::{
    arguments,
    config::{self, with_config},
    logger::{self, LogTag},
    services::implementations::SyncService,
    services::ServiceManager,
    snapshots::SnapshotStore,
    sync::{run_sync, LlamaClient},
};

#[cfg(feature = "web")]
use crate::services::implementations::WebserverService;

/// Main execution function, handles the full lifecycle with ServiceManager
pub async fn run_bot() -> Result<(), String> {
    // 1. Ensure all required directories exist (safety backup, already done in main.rs)
    crate::paths::ensure_all_directories()
        .map_err(|e| format!("Failed to create required directories: {}", e))?;

    // 2. Validate CLI arguments early
    if let Err(e) = arguments::validate_port_argument() {
        logger::error(LogTag::System, &format!("Argument validation failed: {}", e));
        return Err(e);
    }

    // 3. Log CLI overrides (if provided)
    if let Some(port) = arguments::get_port_override() {
        logger::info(LogTag::System, &format!("CLI override: Using port {}", port));
    }
    if let Some(host) = arguments::get_host_override() {
        logger::info(LogTag::System, &format!("CLI override: Using host {}", host));

        if host == "0.0.0.0" {
            logger::warning(
                LogTag::System,
                "Binding to 0.0.0.0 allows remote access - ensure firewall is configured",
            );
        }
    }

    // 4. Load configuration (writes defaults on first run)
    config::load_config().map_err(|e| format!("Failed to load configuration: {}", e))?;
    logger::info(
        LogTag::System,
        &format!(
            "Configuration loaded from {}",
            crate::paths::get_config_path().display()
        ),
    );

    let store = Arc::new(SnapshotStore::from_default_paths());
    logger::info(
        LogTag::System,
        &format!("Snapshot directory: {}", store.data_dir().display()),
    );

    // 5. One-shot mode: fetch a snapshot and exit
    if arguments::is_sync_now_enabled() {
        return sync_once(&store).await;
    }

    // 6. Register and start services
    let config = with_config(|c| c.clone());
    let mut manager = ServiceManager::new(config);

    manager.register(Box::new(SyncService::new(Arc::clone(&store))));
    #[cfg(feature = "web")]
    manager.register(Box::new(WebserverService::new(Arc::clone(&store))));

    let enabled = manager.enabled_services();
    logger::info(
        LogTag::System,
        &format!("Starting services: {}", enabled.join(", ")),
    );

    manager.start_all().await?;

    // 7. Block until a shutdown signal arrives, then stop everything
    wait_for_shutdown_signal().await?;

    manager.shutdown_all().await;
    logger::info(LogTag::System, "All services stopped, goodbye");

    Ok(())
}

/// Immediate fetch+save for `--sync-now`
async fn sync_once(store: &SnapshotStore) -> Result<(), String> {
    logger::info(LogTag::Sync, "One-shot sync requested");

    let client = LlamaClient::from_config()?;
    let path = run_sync(store, &client).await?;

    logger::info(
        LogTag::Sync,
        &format!("Snapshot saved to {}", path.display()),
    );
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    logger::info(
        LogTag::System,
        "Running. Press Ctrl+C to stop (twice to force kill)",
    );

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint =
            signal(SignalKind::interrupt()).map_err(|e| format!("Failed to bind SIGINT: {}", e))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(not(unix))]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!("Shutdown signal received ({}), stopping services...", signal_name),
    );

    // A second Ctrl+C during graceful shutdown exits immediately
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger::error(LogTag::System, "Second Ctrl+C detected, forcing exit");
            std::process::exit(130);
        }
    });

    Ok(())
}
