//! Fetching the release listing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::ReleaseCollection;
use super::listing::{ListingEnvelope, ListingShape};

/// Source of the releases offered on the landing page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    /// The endpoint the listing is read from.
    fn listing_url(&self) -> &str;

    /// Fetches the listing once and returns the downloadable releases, newest first.
    async fn fetch_releases(&self) -> Result<ReleaseCollection>;
}

/// Reads the listing over HTTP.
pub struct HttpReleaseRepository {
    http_client: HttpClient,
    listing_url: String,
}

impl HttpReleaseRepository {
    pub fn new(http_client: HttpClient, listing_url: impl Into<String>) -> Self {
        Self {
            http_client,
            listing_url: listing_url.into(),
        }
    }
}

#[async_trait]
impl ReleaseRepository for HttpReleaseRepository {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_releases(&self) -> Result<ReleaseCollection> {
        debug!("Fetching releases from {}...", self.listing_url);

        let envelope: ListingEnvelope = self
            .http_client
            .get_json(&self.listing_url)
            .await
            .with_context(|| format!("Failed to fetch releases from {}", self.listing_url))?;

        let shape = ListingShape::from(envelope);
        debug!("Release listing shape: {}", shape_name(&shape));

        let collection = ReleaseCollection::from_releases(shape.into_releases());
        debug!("{} release(s) with an APK available", collection.len());

        Ok(collection)
    }
}

fn shape_name(shape: &ListingShape) -> &'static str {
    match shape {
        ListingShape::Nested(_) => "result.releases",
        ListingShape::Flat(_) => "releases",
        ListingShape::Missing => "none",
    }
}
