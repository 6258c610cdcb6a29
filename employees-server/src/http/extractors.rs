//! Custom Axum extractors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::server::{AppState, ResponseMode};

/// Extract an integer employee id from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeId(pub i32);

impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            // Segment didn't percent-decode; report it as sent
            Err(_) => {
                let segment = parts.uri.path().rsplit('/').next().unwrap_or_default();
                return Err(ApiError::InvalidId(segment.to_string()));
            }
        };

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ApiError::InvalidId(raw))
    }
}

/// JSON request body, decoded regardless of `Content-Type`.
///
/// Legacy mode zero-fills missing or `null` fields instead of rejecting
/// the body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T> FromRequest<Arc<AppState>> for JsonBody<T>
where
    T: DeserializeOwned + Serialize + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Decode(rejection.body_text()))?;

        decode_body(&bytes, state.response_mode).map(Self)
    }
}

/// Decode a request body for the given response mode.
pub fn decode_body<T>(bytes: &[u8], mode: ResponseMode) -> Result<T, ApiError>
where
    T: DeserializeOwned + Serialize + Default,
{
    if mode == ResponseMode::Standard {
        return Ok(serde_json::from_slice(bytes)?);
    }

    let mut merged = serde_json::to_value(T::default())?;
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(fields) => {
            if let Value::Object(base) = &mut merged {
                base.extend(fields.into_iter().filter(|(_, value)| !value.is_null()));
            }
        }
        Value::Null => {}
        // Arrays and scalars: let the typed decode report the mismatch
        _ => return Ok(serde_json::from_slice(bytes)?),
    }

    Ok(serde_json::from_value(merged)?)
}
