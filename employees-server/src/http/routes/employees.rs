//! Employee endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::method_not_allowed;
use crate::http::error::ApiError;
use crate::http::extractors::{EmployeeId, JsonBody};
use crate::http::server::{AppState, ResponseMode};
use crate::models::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};
use crate::validation::validate_employee;

/// Delete acknowledgement
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /employee - list all employees
async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = state.store.get_employees().await?;
    Ok(Json(employees))
}

/// POST /employee - validate and create an employee
async fn create_employee(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let mut employee = req.into_employee();

    validate_employee(state.store.as_ref(), &employee).await?;
    let id = state.store.create_employee(&employee).await?;
    tracing::info!(id, city_id = employee.city_id, "Employee created");

    // Legacy clients get the record exactly as submitted
    if state.response_mode == ResponseMode::Standard {
        employee.id = id;
    }

    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /employee/{id} - get a single employee
async fn get_employee(
    State(state): State<Arc<AppState>>,
    EmployeeId(id): EmployeeId,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.store.get_employee_by_id(id).await?;
    Ok(Json(employee))
}

/// PUT /employee/{id} - replace an employee's fields
async fn update_employee(
    State(state): State<Arc<AppState>>,
    EmployeeId(id): EmployeeId,
    JsonBody(req): JsonBody<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    let mut employee = state.store.get_employee_by_id(id).await?;
    req.apply_to(&mut employee);

    validate_employee(state.store.as_ref(), &employee).await?;
    state.store.update_employee(&employee).await?;
    tracing::info!(id, "Employee updated");

    Ok(Json(employee))
}

/// DELETE /employee/{id} - delete, whether or not the id exists
async fn delete_employee(
    State(state): State<Arc<AppState>>,
    EmployeeId(id): EmployeeId,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store.delete_employee(id).await?;
    Ok(Json(StatusResponse { status: "deleted" }))
}

/// Employee routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/employee",
            get(list_employees)
                .post(create_employee)
                .fallback(method_not_allowed),
        )
        .route(
            "/employee/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee)
                .fallback(method_not_allowed),
        )
}
