//! Runtime configuration.
//!
//! Every setting is a CLI flag with an environment fallback, so the same
//! binary can be configured from a shell or a deployment manifest.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use reqwest::Client;

use crate::http::HttpClient;

/// Upstream API used in development mode when no override is given.
pub const DEVELOPMENT_UPSTREAM_URL: &str = "http://localhost:8000";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Address the HTTP server listens on
    #[arg(long, env = "EDUSEC_BIND", default_value = DEFAULT_BIND, global = true)]
    pub bind: SocketAddr,

    /// Public base URL of this service
    #[arg(long, env = "EDUSEC_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Deployment host name; the base URL becomes https://<HOST>
    #[arg(long, env = "EDUSEC_PUBLIC_HOST", value_name = "HOST", global = true)]
    pub public_host: Option<String>,

    /// Base URL of the upstream release API
    #[arg(long, env = "EDUSEC_UPSTREAM_URL", value_name = "URL", global = true)]
    pub upstream_url: Option<String>,

    /// Development mode: defaults the upstream API to http://localhost:8000
    #[arg(long, env = "EDUSEC_DEVELOPMENT", global = true)]
    pub development: bool,

    /// Timeout for requests to the upstream API, in seconds
    #[arg(
        long,
        env = "EDUSEC_TIMEOUT_SECS",
        default_value_t = 10,
        value_name = "SECONDS",
        global = true
    )]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            base_url: None,
            public_host: None,
            upstream_url: None,
            development: false,
            timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Base URL under which this service is reachable.
    pub fn public_base_url(&self) -> String {
        if let Some(url) = non_empty(&self.base_url) {
            return trim_url(url);
        }

        if let Some(host) = non_empty(&self.public_host) {
            return format!("https://{}", host.trim_end_matches('/'));
        }

        format!("http://localhost:{}", self.bind.port())
    }

    /// Base URL of the upstream release API.
    pub fn upstream_base_url(&self) -> String {
        if let Some(url) = non_empty(&self.upstream_url) {
            return trim_url(url);
        }

        if self.development {
            return DEVELOPMENT_UPSTREAM_URL.to_string();
        }

        // Same origin as this service
        self.public_base_url()
    }

    /// Upstream endpoint that lists releases.
    pub fn upstream_listing_url(&self) -> String {
        format!("{}/api/download/releases", self.upstream_base_url())
    }

    /// This service's own listing endpoint, read by the landing page.
    pub fn public_listing_url(&self) -> String {
        format!("{}/api/releases", self.public_base_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn http_client(&self) -> Result<HttpClient> {
        let client = Client::builder()
            .user_agent(concat!("edusec-landing/", env!("EDUSEC_VERSION")))
            .connect_timeout(self.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        debug!(
            "HTTP client ready (upstream {}, timeout {}s)",
            self.upstream_base_url(),
            self.timeout_secs
        );

        Ok(HttpClient::with_timeout(client, self.timeout()))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
