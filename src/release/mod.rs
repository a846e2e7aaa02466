//! Release model and the release-selection / download-resolution flow.
//!
//! Upstream listings are normalized into [`Release`] values at the
//! repository boundary; everything downstream works on a
//! [`ReleaseCollection`] and never sees the wire format.

mod collection;
pub mod listing;
mod presenter;
mod repository;
mod resolver;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

pub use collection::ReleaseCollection;
pub use listing::{ListingEnvelope, ListingShape, parse_published_at};
pub use presenter::{DownloadAvailability, ReleaseDetails, VersionSelection};
pub use repository::{HttpReleaseRepository, ReleaseRepository};
pub use resolver::{DownloadResolver, DownloadTarget, VersionToken};

#[cfg(test)]
pub use repository::MockReleaseRepository;

/// Metadata of the APK attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkInfo {
    pub file_name: String,
    /// Absolute URL of the artifact
    pub download_url: String,
    pub size_bytes: u64,
    /// Counter maintained upstream, informational only
    pub download_count: u64,
}

/// A published version of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: u64,
    /// Version tag (e.g., "v1.2.0")
    pub tag_name: String,
    pub display_name: String,
    /// `None` when upstream sent no usable timestamp
    pub published_at: Option<DateTime<Utc>>,
    /// The downloadable artifact, if any
    pub apk: Option<ApkInfo>,
}

impl Release {
    pub fn apk_available(&self) -> bool {
        self.apk.is_some()
    }

    /// The artifact URL, only when it is an http(s) link.
    pub fn download_url(&self) -> Option<&str> {
        let url = self.apk.as_ref()?.download_url.as_str();
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(url),
            _ => None,
        }
    }
}
