/// Snapshot listing and manual sync endpoints
use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::sync::{run_sync, LlamaClient};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub status: String,
    pub message: String,
}

/// Create snapshot routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/snapshots", get(list_snapshots))
        .route("/sync", post(trigger_sync))
}

/// GET /api/snapshots
async fn list_snapshots(State(state): State<Arc<AppState>>) -> Response {
    let meta = state.store.list_meta();

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!("Listing {} stored snapshots", meta.len()),
        );
    }

    success_response(meta)
}

/// POST /api/sync
///
/// Runs a full fetch+save cycle immediately, independent of the scheduler.
async fn trigger_sync(State(state): State<Arc<AppState>>) -> Response {
    logger::info(LogTag::Webserver, "Manual sync triggered via API");

    let client = match LlamaClient::from_config() {
        Ok(client) => client,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CLIENT_INIT_FAILED",
                &e,
                None,
            );
        }
    };

    match run_sync(&state.store, &client).await {
        Ok(path) => success_response(SyncResponse {
            status: "ok".to_string(),
            message: format!("Snapshot saved to {}", path.display()),
        }),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "SYNC_FAILED", &e, None),
    }
}
