use axum::Router;
use std::sync::Arc;

use crate::webserver::state::AppState;

pub mod report;
pub mod snapshots;
pub mod stats;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(report::routes())
        .merge(snapshots::routes())
        .merge(stats::routes())
}
