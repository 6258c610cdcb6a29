//! Schema bootstrap and city seeding

use sqlx::PgPool;

use super::store::StoreError;
use crate::models::SEED_CITIES;

/// Create tables if absent, then seed cities.
pub async fn run(pool: &PgPool) -> Result<(), StoreError> {
    tracing::info!("Running schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            name TEXT,
            phone TEXT,
            city_id INT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            id SERIAL PRIMARY KEY,
            name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    let seeded = seed_cities(pool).await?;
    tracing::info!(seeded, "Schema bootstrap complete");
    Ok(())
}

/// Insert [`SEED_CITIES`] when the table is empty.
///
/// All-or-nothing: any failed insert rolls back the whole seed. The table
/// lock keeps two instances starting together from seeding twice.
/// Returns the number of rows inserted.
pub async fn seed_cities(pool: &PgPool) -> Result<usize, StoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query("LOCK TABLE cities IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cities")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        tx.commit().await?;
        tracing::debug!(existing, "Cities already seeded");
        return Ok(0);
    }

    for name in SEED_CITIES {
        sqlx::query("INSERT INTO cities (name) VALUES ($1)")
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(count = SEED_CITIES.len(), "Seeded cities");
    Ok(SEED_CITIES.len())
}
