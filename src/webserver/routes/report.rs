/// Report generation endpoints
///
/// All three endpoints share the same query parameters and differ only in
/// how the resulting report is rendered: raw JSON, Markdown wrapped in a
/// JSON envelope, or Markdown served as a file attachment.
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::analysis::{build_report, create_markdown_report, FilterCriteria, TvlReport};
use crate::arguments::is_debug_webserver_enabled;
use crate::config::with_config;
use crate::logger::{self, LogTag};
use crate::snapshots::{parse_snapshot_date, SnapshotStore};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub start_file: Option<String>,
    pub end_file: Option<String>,
    pub min_tvl: Option<f64>,
    pub max_tvl: Option<f64>,
    pub top_n: Option<usize>,
}

/// Failure modes shared by the report endpoints
#[derive(Debug)]
pub enum ReportError {
    MissingParams(&'static str),
    InvalidFilename(String),
    SnapshotNotFound(String),
    Internal(String),
}

impl ReportError {
    fn into_response(self) -> Response {
        match self {
            ReportError::MissingParams(param) => error_response(
                StatusCode::BAD_REQUEST,
                "MISSING_PARAMS",
                &format!("Missing required query parameter: {}", param),
                None,
            ),
            ReportError::InvalidFilename(name) => error_response(
                StatusCode::BAD_REQUEST,
                "INVALID_FILENAME",
                &format!("Filename has no parseable date: {}", name),
                None,
            ),
            ReportError::SnapshotNotFound(name) => error_response(
                StatusCode::NOT_FOUND,
                "SNAPSHOT_NOT_FOUND",
                &format!("Snapshot not found: {}", name),
                None,
            ),
            ReportError::Internal(msg) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REPORT_FAILED",
                &msg,
                None,
            ),
        }
    }
}

/// Create report routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/report", get(get_report))
        .route("/report/view", get(get_report_view))
        .route("/report/download", get(get_report_download))
}

/// Build a report from query parameters
///
/// Pure apart from snapshot loading, so error mapping stays testable
/// without a running server.
pub fn report_from_query(
    store: &SnapshotStore,
    query: &ReportQuery,
) -> Result<TvlReport, ReportError> {
    let start_file = query
        .start_file
        .as_deref()
        .ok_or(ReportError::MissingParams("start_file"))?;
    let end_file = query
        .end_file
        .as_deref()
        .ok_or(ReportError::MissingParams("end_file"))?;

    let start_date = parse_snapshot_date(start_file)
        .ok_or_else(|| ReportError::InvalidFilename(start_file.to_string()))?;
    let end_date = parse_snapshot_date(end_file)
        .ok_or_else(|| ReportError::InvalidFilename(end_file.to_string()))?;

    let load = |name: &str| {
        store.load(name).map_err(|e| {
            if e.is_not_found() {
                ReportError::SnapshotNotFound(name.to_string())
            } else {
                ReportError::Internal(e.to_string())
            }
        })
    };

    let start = load(start_file)?;
    let end = load(end_file)?;

    let min_tvl = query
        .min_tvl
        .unwrap_or_else(|| with_config(|c| c.filters.default_min_tvl));
    let filter = FilterCriteria::from_config(min_tvl, query.max_tvl);

    Ok(build_report(
        &start, &end, start_date, end_date, &filter, query.top_n,
    ))
}

/// GET /api/report
async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, &format!("Report requested: {:?}", query));
    }

    match report_from_query(&state.store, &query) {
        Ok(report) => success_response(report),
        Err(e) => e.into_response(),
    }
}

/// GET /api/report/view
async fn get_report_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    match report_from_query(&state.store, &query) {
        Ok(report) => {
            let markdown = create_markdown_report(&report);
            success_response(json!({ "markdown": markdown }))
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/report/download
async fn get_report_download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    match report_from_query(&state.store, &query) {
        Ok(report) => {
            let markdown = create_markdown_report(&report);
            let filename = download_filename(&report);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/markdown".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                markdown,
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn download_filename(report: &TvlReport) -> String {
    format!(
        "DeFi_Report_{}.md",
        report.report_metadata.report_date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshots::ProtocolRecord;
    use tempfile::TempDir;

    fn test_record(id: &str, category: &str, tvl: Option<f64>) -> ProtocolRecord {
        ProtocolRecord::test_record(id, category, tvl)
    }

    fn query(start: Option<&str>, end: Option<&str>) -> ReportQuery {
        ReportQuery {
            start_file: start.map(String::from),
            end_file: end.map(String::from),
            min_tvl: Some(0.0),
            max_tvl: None,
            top_n: None,
        }
    }

    #[test]
    fn test_missing_params_rejected() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let err = report_from_query(&store, &query(None, Some("2025-07-18 10_30.json")))
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingParams("start_file")));

        let err = report_from_query(&store, &query(Some("2025-07-18 10_30.json"), None))
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingParams("end_file")));
    }

    #[test]
    fn test_unknown_snapshot_maps_to_not_found() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let err = report_from_query(
            &store,
            &query(Some("2025-07-11 04_05.json"), Some("2025-07-18 04_05.json")),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::SnapshotNotFound(_)));
    }

    #[test]
    fn test_undated_filename_rejected() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let err = report_from_query(
            &store,
            &query(Some("not_a_date.json"), Some("2025-07-18 04_05.json")),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidFilename(_)));
    }

    #[test]
    fn test_report_builds_from_stored_snapshots() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf());

        let start = vec![test_record("aave", "lending", Some(100.0))];
        let end = vec![test_record("aave", "lending", Some(150.0))];
        std::fs::write(
            dir.path().join("2025-07-11 04_05.json"),
            serde_json::to_string(&start).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("2025-07-18 04_05.json"),
            serde_json::to_string(&end).unwrap(),
        )
        .unwrap();

        let report = report_from_query(
            &store,
            &query(Some("2025-07-11 04_05.json"), Some("2025-07-18 04_05.json")),
        )
        .unwrap();
        assert_eq!(report.top_increases_pct.len(), 1);
        assert_eq!(report.report_metadata.protocol_count, 1);
        assert_eq!(download_filename(&report), "DeFi_Report_2025-07-18.md");
    }
}
