//! HTTP client with per-request timeouts and upstream error classification.

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::status::check_status;

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for talking to the upstream release service.
///
/// Every request is a single attempt bounded by `timeout`; failures are
/// reported to the caller, never retried.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| check_status(e, self.timeout))
            .context("Failed to send request")?;

        let response = response
            .error_for_status()
            .map_err(|e| check_status(e, self.timeout))?;

        let result = response
            .json::<T>()
            .await
            .map_err(|e| check_status(e, self.timeout))
            .context("Failed to parse JSON response")?;

        Ok(result)
    }
}
