//! Wire format of the release listing and its normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{ApkInfo, Release};

/// Upstream wire types (internal).
pub mod api {
    use serde::Deserialize;

    // Scalars are `Option` so an explicit `null` does not reject the listing
    #[derive(Deserialize, Debug, Clone)]
    pub struct Release {
        pub id: u64,
        #[serde(default)]
        pub tag_name: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub published_at: Option<String>,
        #[serde(default)]
        pub apk_available: Option<bool>,
        #[serde(default)]
        pub apk_info: Option<ApkInfo>,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct ApkInfo {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub download_url: Option<String>,
        #[serde(default)]
        pub size: Option<u64>,
        #[serde(default)]
        pub download_count: Option<u64>,
    }
}

/// Top-level body of a listing response.
///
/// Upstream has shipped both `{ result: { releases } }` and `{ releases }`;
/// this envelope accepts either and [`ListingShape`] decides which one wins.
#[derive(Deserialize, Debug, Default)]
pub struct ListingEnvelope {
    #[serde(default)]
    result: Option<ListingResult>,
    #[serde(default)]
    releases: Option<Vec<api::Release>>,
}

#[derive(Deserialize, Debug, Default)]
struct ListingResult {
    #[serde(default)]
    releases: Option<Vec<api::Release>>,
}

/// The listing shapes upstream may answer with.
#[derive(Debug)]
pub enum ListingShape {
    /// `{ result: { releases: [...] } }`
    Nested(Vec<api::Release>),
    /// `{ releases: [...] }`
    Flat(Vec<api::Release>),
    /// Neither field carries a list
    Missing,
}

impl From<ListingEnvelope> for ListingShape {
    fn from(envelope: ListingEnvelope) -> Self {
        if let Some(releases) = envelope.result.and_then(|r| r.releases) {
            return ListingShape::Nested(releases);
        }
        match envelope.releases {
            Some(releases) => ListingShape::Flat(releases),
            None => ListingShape::Missing,
        }
    }
}

impl ListingShape {
    /// Normalizes every wire record into the internal model, in input order.
    pub fn into_releases(self) -> Vec<Release> {
        let raw = match self {
            ListingShape::Nested(releases) | ListingShape::Flat(releases) => releases,
            ListingShape::Missing => Vec::new(),
        };
        raw.into_iter().map(Release::from).collect()
    }
}

impl From<api::Release> for Release {
    fn from(r: api::Release) -> Self {
        // The artifact only counts when the flag, the metadata and its URL are present
        let apk = if r.apk_available.unwrap_or_default() {
            r.apk_info.and_then(apk_from_wire)
        } else {
            None
        };

        let tag_name = r.tag_name.unwrap_or_default();
        let display_name = match r.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => tag_name.clone(),
        };

        Release {
            id: r.id,
            tag_name,
            display_name,
            published_at: r.published_at.as_deref().and_then(parse_published_at),
            apk,
        }
    }
}

/// Normalizes artifact metadata; records without a download URL carry no artifact.
fn apk_from_wire(a: api::ApkInfo) -> Option<ApkInfo> {
    Some(ApkInfo {
        file_name: a.name.unwrap_or_default(),
        download_url: a.download_url?,
        size_bytes: a.size.unwrap_or_default(),
        download_count: a.download_count.unwrap_or_default(),
    })
}

/// Parses a publication timestamp.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(body: &str) -> Vec<Release> {
        let envelope: ListingEnvelope = serde_json::from_str(body).unwrap();
        ListingShape::from(envelope).into_releases()
    }

    #[test]
    fn test_nested_shape() {
        let releases = parse(
            r#"{"success": true, "result": {"releases": [
                {"id": 1, "tag_name": "v1.0.0", "name": "First", "published_at": "2024-01-01T00:00:00Z",
                 "apk_available": true,
                 "apk_info": {"name": "app.apk", "download_url": "https://x/app.apk", "size": 10, "download_count": 3}}
            ]}}"#,
        );

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].id, 1);
        assert_eq!(releases[0].display_name, "First");
        let apk = releases[0].apk.as_ref().unwrap();
        assert_eq!(apk.file_name, "app.apk");
        assert_eq!(apk.size_bytes, 10);
        assert_eq!(apk.download_count, 3);
    }

    #[test]
    fn test_flat_shape() {
        let releases = parse(r#"{"releases": [{"id": 7, "tag_name": "v7"}]}"#);
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].id, 7);
        assert!(!releases[0].apk_available());
    }

    #[test]
    fn test_nested_shape_preferred_over_flat() {
        let releases = parse(
            r#"{"result": {"releases": [{"id": 1}]}, "releases": [{"id": 2}, {"id": 3}]}"#,
        );
        assert_eq!(releases.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_result_without_releases_falls_back_to_flat() {
        let releases = parse(r#"{"result": {}, "releases": [{"id": 2}]}"#);
        assert_eq!(releases.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_missing_shape_is_empty() {
        let envelope: ListingEnvelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        let shape = ListingShape::from(envelope);
        assert!(matches!(shape, ListingShape::Missing));
        assert!(shape.into_releases().is_empty());
    }

    #[test]
    fn test_null_releases_is_missing() {
        let releases = parse(r#"{"result": null, "releases": null}"#);
        assert!(releases.is_empty());
    }

    #[test]
    fn test_flag_without_metadata_has_no_apk() {
        let releases = parse(
            r#"{"releases": [{"id": 1, "apk_available": true, "apk_info": null}]}"#,
        );
        assert!(releases[0].apk.is_none());
    }

    #[test]
    fn test_metadata_without_flag_is_dropped() {
        let releases = parse(
            r#"{"releases": [{"id": 1, "apk_available": false,
                "apk_info": {"name": "a.apk", "download_url": "https://x/a.apk", "size": 1, "download_count": 0}}]}"#,
        );
        assert!(releases[0].apk.is_none());
    }

    #[test]
    fn test_null_scalars_do_not_reject_listing() {
        let releases = parse(
            r#"{"releases": [
                {"id": 1, "tag_name": null, "name": null, "published_at": null, "apk_available": true,
                 "apk_info": {"name": null, "download_url": "https://x/a.apk", "size": null, "download_count": null}},
                {"id": 2, "tag_name": "v2", "apk_available": null, "apk_info": null}
            ]}"#,
        );

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "");
        let apk = releases[0].apk.as_ref().unwrap();
        assert_eq!(apk.file_name, "");
        assert_eq!(apk.size_bytes, 0);
        assert_eq!(apk.download_count, 0);
        assert!(!releases[1].apk_available());
    }

    #[test]
    fn test_metadata_without_url_has_no_apk() {
        let releases = parse(
            r#"{"releases": [{"id": 1, "apk_available": true,
                "apk_info": {"name": "a.apk", "download_url": null, "size": 1, "download_count": 0}}]}"#,
        );
        assert!(releases[0].apk.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_tag() {
        let releases = parse(
            r#"{"releases": [{"id": 1, "tag_name": "v1.2.0", "name": null}, {"id": 2, "tag_name": "v2", "name": "  "}]}"#,
        );
        assert_eq!(releases[0].display_name, "v1.2.0");
        assert_eq!(releases[1].display_name, "v2");
    }

    #[test]
    fn test_parse_published_at_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_published_at("2024-01-01"), Some(midnight));
        assert_eq!(parse_published_at("2024-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_published_at("2024-01-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_published_at("2024-01-01T00:00:00"), Some(midnight));
        assert_eq!(parse_published_at("2024-01-01T00:00:00.000"), Some(midnight));
        assert_eq!(parse_published_at("yesterday"), None);
        assert_eq!(parse_published_at(""), None);
    }
}
