use axum::extract::RawQuery;
use axum::{Extension, Json};
use log::{debug, warn};
use serde::Serialize;
use url::form_urlencoded;

use crate::error::ServiceError;
use crate::server::AppState;

const VERSION_PARAM: &str = "version";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    success: bool,
    download_url: String,
}

/// Resolves `?version=<token>` to the upstream artifact URL.
#[tracing::instrument(skip(state))]
pub async fn resolve_download(
    Extension(state): Extension<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<DownloadResponse>, ServiceError> {
    let target = version_param(query.as_deref())
        .and_then(|version| state.resolver.resolve(version.as_deref()))
        .inspect_err(|e| warn!("Error in download API: {}", e))?;

    debug!("Resolved {:?} to {}", query, target.download_url);

    Ok(Json(DownloadResponse {
        success: true,
        download_url: target.download_url,
    }))
}

/// First `version` value of the query string; repeated keys are ignored.
fn version_param(query: Option<&str>) -> Result<Option<String>, ServiceError> {
    let Some(query) = query else {
        return Ok(None);
    };

    let value = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key.as_ref() == VERSION_PARAM)
        .map(|(_, value)| value.into_owned());

    // Undecodable bytes come back as U+FFFD
    match value {
        Some(value) if value.contains(char::REPLACEMENT_CHARACTER) => Err(
            ServiceError::validation("Version parameter must be valid UTF-8"),
        ),
        value => Ok(value),
    }
}
