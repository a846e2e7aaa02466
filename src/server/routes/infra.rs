use axum::http::StatusCode;

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}

pub async fn version() -> (StatusCode, &'static str) {
    (StatusCode::OK, env!("EDUSEC_VERSION"))
}
