//! API error types with IntoResponse
//!
//! Every error becomes `{"error": <message>}`. In legacy mode the status is
//! rewritten to 500 by [`collapse_error_status`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::validation::ValidationError;

/// Marker attached to every error response
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponse;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body (400)
    Decode(String),

    /// Employee failed validation (400, or 500 when the city check failed)
    Validation(ValidationError),

    /// Path id is not an integer (400)
    InvalidId(String),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i32 },

    /// Method not routed for this path (405)
    MethodNotAllowed,

    /// Storage failure (500, logged)
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Validation(ValidationError::CityCheckFailed) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the error envelope.
    pub fn message(&self) -> String {
        match self {
            Self::Decode(reason) => reason.clone(),
            Self::Validation(e) => e.to_string(),
            Self::InvalidId(raw) => format!("invalid id given {}", raw),
            Self::NotFound { resource, id } => format!("{} {} not found", resource, id),
            Self::MethodNotAllowed => "method not allowed".to_string(),
            // Log the actual error, return generic message
            Self::Store(_) => "an internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::error!("Storage error: {}", e);
        }

        let status = self.status();
        let body = json!({ "error": self.message() });

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorResponse);
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Store(e),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(format!("invalid request body: {}", e))
    }
}

/// Legacy status mapping: every error response becomes a 500.
///
/// Only touches responses produced by [`ApiError`]; unknown paths keep
/// axum's default 404.
pub async fn collapse_error_status(mut response: Response) -> Response {
    if response.extensions().get::<ErrorResponse>().is_some() {
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    }
    response
}
