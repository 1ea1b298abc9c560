//! Status source abstraction and the HTTP fetcher.
//!
//! The monitor pulls device status through the [`StatusSource`] trait so
//! that the poll loop can be driven by scripted sources in tests. The
//! production implementation is [`StatusFetcher`], which queries the
//! device's status endpoint over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{FetchError, ParseError};
use crate::status::DeviceStatus;

/// Trait for obtaining device status reports.
///
/// Implementations perform exactly one attempt per call; retry cadence is
/// the caller's poll interval, not the source's concern.
#[async_trait]
pub trait StatusSource: Send {
    /// Fetch the current status report.
    async fn fetch(&self) -> Result<DeviceStatus, FetchError>;

    /// Human-readable description of the source, for the startup banner.
    fn description(&self) -> &str;
}

/// Fetches status reports from the device's HTTP API.
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    client: Client,
    url: String,
}

impl StatusFetcher {
    /// Create a fetcher for the given endpoint URL with a per-request
    /// timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: endpoint.into(),
        })
    }
}

#[async_trait]
impl StatusSource for StatusFetcher {
    async fn fetch(&self) -> Result<DeviceStatus, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Other(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let status: DeviceStatus = response
            .json()
            .await
            .map_err(|e| ParseError(e.to_string()))?;

        Ok(status)
    }

    fn description(&self) -> &str {
        &self.url
    }
}
