//! Errors surfaced by the service boundary.

use std::fmt::Display;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    /// Caller-supplied input is missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// The upstream release service could not be reached or answered with a failure.
    #[error("{message}: {details}")]
    Upstream { message: String, details: String },
    /// Anything else that went wrong while handling the request.
    #[error("{message}: {details}")]
    Internal { message: String, details: String },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>, details: impl Display) -> Self {
        Self::Upstream {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>, details: impl Display) -> Self {
        Self::Internal {
            message: message.into(),
            details: details.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Upstream { .. } | ServiceError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (error, details) = match &self {
            ServiceError::Validation(message) => (message.as_str(), None),
            ServiceError::Upstream { message, details }
            | ServiceError::Internal { message, details } => {
                (message.as_str(), Some(details.as_str()))
            }
        };

        let body = ErrorBody {
            success: false,
            error,
            details,
        };

        (self.status(), Json(body)).into_response()
    }
}
