//! The set of releases a visitor may pick from.

use super::Release;

/// Releases that carry an artifact, newest first.
///
/// Built once per fetch and never mutated afterwards; a refetch replaces the
/// whole collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseCollection {
    releases: Vec<Release>,
}

impl ReleaseCollection {
    /// Keeps releases with an artifact and orders them by `published_at`,
    /// newest first. Equal timestamps keep their input order; releases with
    /// no timestamp go last.
    pub fn from_releases(releases: impl IntoIterator<Item = Release>) -> Self {
        let mut releases: Vec<Release> = releases
            .into_iter()
            .filter(Release::apk_available)
            .collect();

        // `sort_by` is stable
        releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Self { releases }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The newest release, if any.
    pub fn latest(&self) -> Option<&Release> {
        self.releases.first()
    }

    pub fn get(&self, id: u64) -> Option<&Release> {
        self.releases.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    pub fn as_slice(&self) -> &[Release] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReleaseCollection {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
