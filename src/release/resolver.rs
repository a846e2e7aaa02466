//! Mapping a version token to the upstream artifact URL.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::ServiceError;

/// Path under the upstream base URL that serves artifacts.
const DOWNLOAD_PATH: [&str; 2] = ["api", "download"];

pub const LATEST: &str = "latest";

/// A requested version: the `latest` sentinel or a specific tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionToken {
    Latest,
    Tag(String),
}

impl VersionToken {
    /// Parses a caller-supplied token. Missing or blank tokens are rejected.
    pub fn parse(token: Option<&str>) -> Result<Self, ServiceError> {
        let token = token.map(str::trim).unwrap_or_default();
        match token {
            "" => Err(ServiceError::validation("Version parameter is required")),
            LATEST => Ok(VersionToken::Latest),
            tag => Ok(VersionToken::Tag(tag.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VersionToken::Latest => LATEST,
            VersionToken::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a version can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTarget {
    pub download_url: String,
}

/// Builds artifact URLs against the upstream API.
///
/// Resolution is pure string work: the upstream is never contacted, so a
/// resolved URL may still 404 when followed.
#[derive(Debug, Clone)]
pub struct DownloadResolver {
    upstream_base: String,
}

impl DownloadResolver {
    pub fn new(upstream_base: impl Into<String>) -> Self {
        Self {
            upstream_base: upstream_base.into(),
        }
    }

    /// Resolves a raw token (as received in a query string) to a download URL.
    pub fn resolve(&self, token: Option<&str>) -> Result<DownloadTarget, ServiceError> {
        let token = VersionToken::parse(token)?;
        self.resolve_token(&token)
    }

    pub fn resolve_token(&self, token: &VersionToken) -> Result<DownloadTarget, ServiceError> {
        let mut url = Url::parse(&self.upstream_base)
            .map_err(|e| ServiceError::internal("Download failed", e))?;

        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::internal(
                    "Download failed",
                    format!("{} cannot be used as a base URL", self.upstream_base),
                )
            })?
            .pop_if_empty()
            .extend(DOWNLOAD_PATH)
            .push(token.as_str());

        Ok(DownloadTarget {
            download_url: url.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DownloadResolver {
        DownloadResolver::new("http://localhost:8000")
    }

    #[test]
    fn test_resolve_latest() {
        let target = resolver().resolve(Some("latest")).unwrap();
        assert_eq!(target.download_url, "http://localhost:8000/api/download/latest");
        assert!(target.download_url.ends_with("/api/download/latest"));
    }

    #[test]
    fn test_resolve_tag() {
        let target = resolver().resolve(Some("v2.3.1")).unwrap();
        assert!(target.download_url.ends_with("/api/download/v2.3.1"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let err = resolver().resolve(None).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation("Version parameter is required".to_string())
        );
    }

    #[test]
    fn test_resolve_empty_and_blank_token() {
        assert!(matches!(
            resolver().resolve(Some("")),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            resolver().resolve(Some("   ")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_keeps_base_path() {
        let resolver = DownloadResolver::new("https://api.example.com/edusec/");
        let target = resolver.resolve(Some("v1.0.0")).unwrap();
        assert_eq!(
            target.download_url,
            "https://api.example.com/edusec/api/download/v1.0.0"
        );
    }

    #[test]
    fn test_resolve_encodes_token_as_single_segment() {
        let target = resolver().resolve(Some("release/1 beta")).unwrap();
        assert_eq!(
            target.download_url,
            "http://localhost:8000/api/download/release%2F1%20beta"
        );
    }

    #[test]
    fn test_resolve_invalid_base_is_internal_error() {
        let err = DownloadResolver::new("not a url")
            .resolve(Some("latest"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Internal { .. }));

        let err = DownloadResolver::new("mailto:someone@example.com")
            .resolve(Some("latest"))
            .unwrap_err();
        match err {
            ServiceError::Internal { message, details } => {
                assert_eq!(message, "Download failed");
                assert!(details.contains("cannot be used as a base URL"));
            }
            other => panic!("Expected internal error, got {:?}", other),
        }
    }

    #[test]
    fn test_version_token_parse() {
        assert_eq!(VersionToken::parse(Some("latest")).unwrap(), VersionToken::Latest);
        assert_eq!(
            VersionToken::parse(Some(" v1.0.0 ")).unwrap(),
            VersionToken::Tag("v1.0.0".to_string())
        );
        assert_eq!(VersionToken::Latest.to_string(), "latest");
    }
}
