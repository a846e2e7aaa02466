use axum::{Extension, Json};
use log::warn;
use serde_json::Value;

use crate::error::ServiceError;
use crate::server::AppState;

/// Proxies the upstream release listing, passing its JSON body through unchanged.
#[tracing::instrument(skip(state))]
pub async fn list_releases(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ServiceError> {
    match state
        .http_client
        .get_json::<Value>(&state.upstream_listing_url)
        .await
    {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            warn!("Error fetching releases: {:#}", e);
            Err(ServiceError::upstream(
                "Failed to fetch releases",
                root_message(&e),
            ))
        }
    }
}

/// The innermost cause, without the context chain.
fn root_message(error: &anyhow::Error) -> String {
    error.root_cause().to_string()
}
