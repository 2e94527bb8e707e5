/// Health check and aggregate statistics endpoints
use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::analysis::{global_stats, GlobalStats};
use crate::snapshots::cache::CacheMetrics;
use crate::snapshots::{ProtocolRecord, SnapshotStore};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub snapshot_cache: CacheMetrics,
}

/// Create health/stats routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
}

/// GET /api/health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        snapshot_cache: state.store.cache_metrics(),
    };

    success_response(response)
}

/// GET /api/stats
///
/// Aggregates over the two most recent snapshots. With no snapshots the
/// response is all zeros rather than an error.
async fn get_stats(State(state): State<Arc<AppState>>) -> Response {
    match latest_stats(&state.store) {
        Ok(stats) => success_response(stats),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "STATS_FAILED", &e, None),
    }
}

fn latest_stats(store: &SnapshotStore) -> Result<GlobalStats, String> {
    let meta = store.list_meta();

    let latest: Option<Arc<Vec<ProtocolRecord>>> = match meta.first() {
        Some(m) => Some(store.load(&m.filename).map_err(|e| e.to_string())?),
        None => None,
    };
    let previous: Option<Arc<Vec<ProtocolRecord>>> = match meta.get(1) {
        Some(m) => Some(store.load(&m.filename).map_err(|e| e.to_string())?),
        None => None,
    };

    Ok(global_stats(
        latest.as_ref().map(|r| r.as_slice()),
        previous.as_ref().map(|r| r.as_slice()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_record(id: &str, category: &str, tvl: Option<f64>) -> ProtocolRecord {
        ProtocolRecord::test_record(id, category, tvl)
    }

    #[test]
    fn test_stats_without_snapshots_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let stats = latest_stats(&store).unwrap();
        assert_eq!(stats, GlobalStats::default());
    }

    #[test]
    fn test_stats_over_two_snapshots() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let older = vec![test_record("aave", "lending", Some(100.0))];
        let newer = vec![
            test_record("aave", "lending", Some(150.0)),
            test_record("uniswap", "dexs", Some(50.0)),
        ];
        std::fs::write(
            dir.path().join("2025-07-17 04_05.json"),
            serde_json::to_string(&older).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("2025-07-18 04_05.json"),
            serde_json::to_string(&newer).unwrap(),
        )
        .unwrap();

        let stats = latest_stats(&store).unwrap();
        assert_eq!(stats.total_tvl, 200.0);
        assert_eq!(stats.protocol_count, 2);
        assert!((stats.change_24h - 100.0).abs() < 1e-9);
    }
}
