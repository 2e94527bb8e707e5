/// Structured error types for the data and API layers
///
/// Service wiring and webserver handlers keep plain `Result<_, String>`;
/// these enums cover the places where callers branch on the failure kind
/// (missing snapshot vs unreadable snapshot, HTTP status vs transport).
use thiserror::Error;

/// Errors from the DeFiLlama API client
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from the snapshot store
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("Failed to read snapshot {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// True when the failure means the requested file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::NotFound(_))
    }
}
