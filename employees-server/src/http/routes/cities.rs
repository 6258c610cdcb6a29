//! City endpoints (read-only)

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::method_not_allowed;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::City;

/// GET /city - list all cities
async fn list_cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<City>>, ApiError> {
    let cities = state.store.get_cities().await?;
    Ok(Json(cities))
}

/// City routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/city", get(list_cities).fallback(method_not_allowed))
}
