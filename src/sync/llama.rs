/// DeFiLlama API client
///
/// Thin reqwest wrapper with an explicit timeout and status check. The
/// /protocols endpoint returns the full protocol list in one response,
/// several megabytes of JSON; one call per sync is all we make.
use reqwest::Client;
use std::time::Duration;

use crate::errors::ApiError;
use crate::logger::{self, LogTag};
use crate::snapshots::ProtocolRecord;

pub struct LlamaClient {
    client: Client,
    url: String,
}

impl LlamaClient {
    pub fn new(url: String, timeout_secs: u64) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, url })
    }

    /// Client configured from the global config
    pub fn from_config() -> Result<Self, String> {
        let (url, timeout_secs) =
            crate::config::with_config(|c| (c.sync.api_url.clone(), c.sync.timeout_secs));
        Self::new(url, timeout_secs)
    }

    /// Fetch the current protocol list
    pub async fn fetch_protocols(&self) -> Result<Vec<ProtocolRecord>, ApiError> {
        logger::debug(LogTag::Api, &format!("GET {}", self.url));

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let records: Vec<ProtocolRecord> =
            response.json().await.map_err(|e| ApiError::Decode {
                url: self.url.clone(),
                source: e,
            })?;

        logger::info(
            LogTag::Api,
            &format!("Fetched {} protocols from DeFiLlama", records.len()),
        );

        Ok(records)
    }
}
