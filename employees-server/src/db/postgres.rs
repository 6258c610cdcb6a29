//! PostgreSQL storage backend

use async_trait::async_trait;
use sqlx::PgPool;

use super::config::DatabaseConfig;
use super::pool::{create_pool, ConnectError, RetryPolicy};
use super::schema;
use super::store::{Storage, StoreError};
use crate::models::{City, Employee};

/// Storage backed by a `PgPool`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using `config`, retrying per `policy`.
    pub async fn connect(
        config: &DatabaseConfig,
        policy: &RetryPolicy,
    ) -> Result<Self, ConnectError> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connecting to database"
        );
        let pool = create_pool(config.connect_options(), policy).await?;
        Ok(Self::new(pool))
    }

    /// Create tables and seed cities.
    pub async fn init(&self) -> Result<(), StoreError> {
        schema::run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_employee(&self, employee: &Employee) -> Result<i32, StoreError> {
        let id = sqlx::query_scalar(
            "INSERT INTO employees (name, phone, city_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&employee.name)
        .bind(&employee.phone)
        .bind(employee.city_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, name, phone, city_id FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn get_employee_by_id(&self, id: i32) -> Result<Employee, StoreError> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, name, phone, city_id FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            resource: "employee",
            id,
        })
    }

    async fn delete_employee(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "Deleted employee");
        Ok(())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE employees SET name = $2, phone = $3, city_id = $4 WHERE id = $1",
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(&employee.phone)
        .bind(employee.city_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                resource: "employee",
                id: employee.id,
            });
        }
        Ok(())
    }

    async fn get_cities(&self) -> Result<Vec<City>, StoreError> {
        let cities = sqlx::query_as::<_, City>("SELECT id, name FROM cities ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(cities)
    }

    async fn city_exists(&self, id: i32) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cities WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
