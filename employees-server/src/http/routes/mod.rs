//! Route handlers organized by resource

pub mod cities;
pub mod employees;
pub mod health;

use crate::http::error::ApiError;

/// Fallback for a known path hit with an unrouted method.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
