//! Selection state behind the version picker.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Release, ReleaseCollection};

/// Whether the download action is enabled for the current release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadAvailability<'a> {
    Available(&'a str),
    Unavailable,
}

/// The release collection plus the id of the release the visitor is looking at.
///
/// Selecting a release only reassigns the id; the collection is never
/// refetched or mutated.
#[derive(Debug, Clone)]
pub struct VersionSelection {
    collection: ReleaseCollection,
    selected_id: Option<u64>,
    fetch_failed: bool,
}

impl VersionSelection {
    pub fn new(collection: ReleaseCollection) -> Self {
        let selected_id = collection.latest().map(|r| r.id);
        Self {
            collection,
            selected_id,
            fetch_failed: false,
        }
    }

    /// Builds the selection from a fetch outcome. A failed fetch behaves like
    /// an empty collection but stays distinguishable through [`Self::fetch_failed`].
    pub fn from_fetch(fetched: Result<ReleaseCollection>) -> Self {
        match fetched {
            Ok(collection) => Self::new(collection),
            Err(_) => Self {
                fetch_failed: true,
                ..Self::new(ReleaseCollection::empty())
            },
        }
    }

    pub fn releases(&self) -> &ReleaseCollection {
        &self.collection
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    pub fn latest(&self) -> Option<&Release> {
        self.collection.latest()
    }

    /// Makes `id` the current release. Unknown ids select the latest release.
    pub fn select(&mut self, id: u64) -> Option<&Release> {
        self.selected_id = match self.collection.get(id) {
            Some(release) => Some(release.id),
            None => self.latest().map(|r| r.id),
        };
        self.current()
    }

    pub fn current(&self) -> Option<&Release> {
        self.selected_id
            .and_then(|id| self.collection.get(id))
            .or_else(|| self.latest())
    }

    pub fn current_download_target(&self) -> DownloadAvailability<'_> {
        match self.current().and_then(Release::download_url) {
            Some(url) => DownloadAvailability::Available(url),
            None => DownloadAvailability::Unavailable,
        }
    }

    pub fn is_latest(&self, release: &Release) -> bool {
        self.latest().is_some_and(|latest| latest.id == release.id)
    }

    pub fn is_current(&self, release: &Release) -> bool {
        self.current().is_some_and(|current| current.id == release.id)
    }

    /// Display data for one release of this selection.
    pub fn details(&self, release: &Release) -> ReleaseDetails {
        let apk = release.apk.as_ref();
        ReleaseDetails {
            id: release.id,
            tag_name: release.tag_name.clone(),
            display_name: release.display_name.clone(),
            published: format_date(release.published_at),
            size: apk.map(|a| format_file_size(a.size_bytes)),
            download_count: apk.map(|a| a.download_count),
            file_name: apk.map(|a| a.file_name.clone()),
            download_url: release.download_url().map(str::to_string),
            is_latest: self.is_latest(release),
            is_current: self.is_current(release),
        }
    }
}

/// A release formatted for the metadata panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseDetails {
    pub id: u64,
    pub tag_name: String,
    pub display_name: String,
    pub published: String,
    pub size: Option<String>,
    pub download_count: Option<u64>,
    pub file_name: Option<String>,
    pub download_url: Option<String>,
    pub is_latest: bool,
    pub is_current: bool,
}

/// `12582912` -> `"12.0 MB"`
pub fn format_file_size(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    format!("{:.1} MB", mb)
}

/// `2024-01-05T..` -> `"Jan 5, 2024"`
pub fn format_date(published_at: Option<DateTime<Utc>>) -> String {
    match published_at {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "Unknown".to_string(),
    }
}
