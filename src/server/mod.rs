//! HTTP service: the proxy endpoints, the landing page and a health probe.

mod routes;
mod state;
mod template;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::Extension;
use axum::http::{HeaderValue, header};
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::get;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(routes::landing::landing))
        .route("/api/releases", get(routes::releases::list_releases))
        .route("/api/apk/download", get(routes::download::resolve_download))
        .route("/api/health", get(routes::infra::health))
        .route("/api/version", get(routes::infra::version))
        .layer(Extension(state))
        .layer(map_response(map_json_charset))
}

/// Runs the server until `shutdown` is cancelled.
pub async fn serve(settings: &Settings, shutdown: CancellationToken) -> Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = create_app(state);

    let listener = TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!("Public base URL: {}", settings.public_base_url());
    info!("Upstream API: {}", settings.upstream_base_url());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Server exited with an error")?;

    info!("Server stopped");
    Ok(())
}

/// Cancels `token` on Ctrl-C.
pub fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                token.cancel();
            }
            Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
        }
    });
}

async fn map_json_charset(mut response: Response) -> Response {
    let Some(content_type) = response.headers_mut().get_mut(header::CONTENT_TYPE) else {
        return response;
    };

    const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");
    if &*content_type == APPLICATION_JSON {
        *content_type = HeaderValue::from_static("application/json; charset=utf-8");
    }

    response
}
