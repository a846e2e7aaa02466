//! Classification of failed upstream requests.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Why a request to the upstream release service did not produce a usable response.
#[derive(Debug, Error, PartialEq)]
pub enum UpstreamFailure {
    /// No response within the configured timeout
    #[error("Upstream request timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    /// Connection refused, DNS failure and similar transport errors
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),
    /// The resource does not exist upstream (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),
    /// Any other 4xx
    #[error("Upstream rejected the request: HTTP {0}")]
    ClientError(u16),
    /// 5xx
    #[error("Upstream API error: {0}")]
    ServerError(u16),
}

/// Maps a reqwest error onto an [`UpstreamFailure`].
///
/// Errors that are neither status nor transport related (body decoding,
/// builder errors) are left to the caller and yield `None`.
pub fn classify_error(error: &reqwest::Error, timeout: Duration) -> Option<UpstreamFailure> {
    if error.is_timeout() {
        return Some(UpstreamFailure::TimedOut(timeout));
    }

    if let Some(status) = error.status() {
        return Some(match status {
            StatusCode::NOT_FOUND => UpstreamFailure::NotFound(
                error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "the requested resource".to_string()),
            ),
            s if s.is_client_error() => UpstreamFailure::ClientError(s.as_u16()),
            s => UpstreamFailure::ServerError(s.as_u16()),
        });
    }

    if error.is_connect() || error.is_request() {
        return Some(UpstreamFailure::Unreachable(error.to_string()));
    }

    None
}

/// Converts an error from `send()` or `error_for_status()` into an anyhow error,
/// preferring the classified form when one applies.
pub fn check_status(error: reqwest::Error, timeout: Duration) -> anyhow::Error {
    match classify_error(&error, timeout) {
        Some(failure) => anyhow::Error::from(failure),
        None => anyhow::Error::from(error),
    }
}
