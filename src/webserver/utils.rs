/// Shared response helpers for API routes
///
/// All API endpoints return a uniform JSON envelope so clients can
/// distinguish payloads from errors without inspecting status codes alone.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Wrap a serializable payload in a 200 OK JSON response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Build a JSON error response with a machine-readable code
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<serde_json::Value>,
) -> Response {
    let mut body = json!({
        "error": {
            "code": code,
            "message": message,
        }
    });

    if let Some(details) = details {
        body["error"]["details"] = details;
    }

    (status, Json(body)).into_response()
}
