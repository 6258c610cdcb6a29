//! Storage trait shared by every backend

use async_trait::async_trait;

use crate::models::{City, Employee};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// Non-SQL backend failure (in-memory store)
    #[error("backend error: {0}")]
    Backend(String),
}

/// Persistence for employees and cities.
///
/// Implementations must be safe to share across request handlers; the
/// HTTP layer holds one behind an `Arc` and does no locking of its own.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;

    /// Insert a new employee and return the generated id.
    ///
    /// `employee.id` is ignored.
    async fn create_employee(&self, employee: &Employee) -> Result<i32, StoreError>;

    /// All employees in storage order. Empty when none exist.
    async fn get_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no row matches.
    async fn get_employee_by_id(&self, id: i32) -> Result<Employee, StoreError>;

    /// Succeeds whether or not the row existed.
    async fn delete_employee(&self, id: i32) -> Result<(), StoreError>;

    /// Replace name, phone and city of the row with `employee.id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no row matches.
    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    /// All seeded cities in id order.
    async fn get_cities(&self) -> Result<Vec<City>, StoreError>;

    async fn city_exists(&self, id: i32) -> Result<bool, StoreError>;
}
