use std::sync::Arc;

use anyhow::Result;
use handlebars::Handlebars;

use crate::config::Settings;
use crate::http::HttpClient;
use crate::release::{DownloadResolver, HttpReleaseRepository, ReleaseRepository};

use super::template;

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub http_client: HttpClient,
    /// Upstream endpoint proxied by `/api/releases`
    pub upstream_listing_url: Arc<str>,
    /// Listing read by the landing page
    pub releases: Arc<dyn ReleaseRepository>,
    pub resolver: DownloadResolver,
    pub templates: Arc<Handlebars<'static>>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http_client = settings.http_client()?;
        let releases = HttpReleaseRepository::new(http_client.clone(), settings.public_listing_url());

        Self::new(
            http_client,
            settings.upstream_listing_url(),
            Arc::new(releases),
            DownloadResolver::new(settings.upstream_base_url()),
        )
    }

    pub fn new(
        http_client: HttpClient,
        upstream_listing_url: impl Into<Arc<str>>,
        releases: Arc<dyn ReleaseRepository>,
        resolver: DownloadResolver,
    ) -> Result<Self> {
        Ok(Self {
            http_client,
            upstream_listing_url: upstream_listing_url.into(),
            releases,
            resolver,
            templates: Arc::new(template::handlebars()?),
        })
    }
}
