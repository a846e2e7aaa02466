//! HTTP client module with request timeouts and upstream failure classification.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{UpstreamFailure, classify_error, check_status};
