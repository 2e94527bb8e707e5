/// Axum webserver implementation
///
/// Main server lifecycle management including startup, shutdown, and
/// graceful termination
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::{
    arguments,
    config::with_config,
    logger::{self, LogTag},
    snapshots::SnapshotStore,
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(store: Arc<SnapshotStore>) -> Result<(), String> {
    let (host, port) = bind_target();

    logger::debug(
        LogTag::Webserver,
        &format!("🌐 Starting webserver on {}:{}", host, port),
    );

    // Create application state
    let state = Arc::new(AppState::new(store));

    // Build the router
    let app = build_app(state);

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        // Provide helpful error message for common cases
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     Another instance may be running, or the port is taken.\n\
                     Use --port to pick a different port.",
                    addr
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     Port {} requires elevated privileges on this system.\n\
                     Consider using a port above 1024.",
                    addr, port
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("✅ Webserver listening on http://{}", addr),
    );
    logger::debug(
        LogTag::Webserver,
        &format!("📊 API endpoints available at http://{}/api", addr),
    );

    // Run the server with graceful shutdown
    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "✅ Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
    SHUTDOWN_NOTIFY.notify_one();
}

/// Resolve the bind address, CLI overrides winning over config
fn bind_target() -> (String, u16) {
    let host = arguments::get_host_override()
        .unwrap_or_else(|| with_config(|c| c.webserver.host.clone()));
    let port = arguments::get_port_override().unwrap_or_else(|| with_config(|c| c.webserver.port));
    (host, port)
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
