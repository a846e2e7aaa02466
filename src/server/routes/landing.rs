use axum::Extension;
use axum::extract::Query;
use axum::response::Html;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::release::{VersionSelection, VersionToken};
use crate::server::AppState;
use crate::server::template::{LANDING_TEMPLATE, LandingPage};

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    release: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn landing(
    Extension(state): Extension<AppState>,
    Query(query): Query<LandingQuery>,
) -> Result<Html<String>, ServiceError> {
    let fetched = state.releases.fetch_releases().await;
    if let Err(e) = &fetched {
        warn!("Error fetching releases: {:#}", e);
    }

    let mut selection = VersionSelection::from_fetch(fetched);
    // Non-numeric ids are treated like unknown ones
    if let Some(id) = query.release.as_deref() {
        match id.trim().parse::<u64>() {
            Ok(id) => {
                selection.select(id);
            }
            Err(_) => debug!("Ignoring invalid release id {:?}", id),
        }
    }

    let hero_download_url = state
        .resolver
        .resolve_token(&VersionToken::Latest)
        .inspect_err(|e| warn!("Unable to resolve the latest download: {}", e))
        .ok()
        .map(|target| target.download_url);

    let page = LandingPage::new(&selection, hero_download_url);
    let html = state
        .templates
        .render(LANDING_TEMPLATE, &page)
        .map_err(|e| ServiceError::internal("Failed to render page", e))?;

    Ok(Html(html))
}
