//! SQLite persistence for locally saved characters.
//!
//! - [`create_pool`] / [`run_migrations`]: connection and schema setup.
//! - [`repositories::CharacterRepo`]: plain queries against `characters`.
//! - [`LocalStore`]: the observable store the rest of the app talks to.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;
pub mod store;

pub use store::LocalStore;

pub type DbPool = sqlx::SqlitePool;

/// Version stamped into `PRAGMA user_version`.
///
/// Any other stored version drops and recreates the schema.
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = include_str!("../schema/characters.sql");

/// Create a connection pool from a database URL.
///
/// File databases are created if missing. In-memory databases
/// (`sqlite::memory:`) live only as long as their connection, so they get
/// a single connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(4)
    };

    pool_options.connect_with(options).await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Bring the schema to [`SCHEMA_VERSION`].
///
/// There is no data migration path: a database stamped with any other
/// version loses its `characters` table.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    let current = schema_version(pool).await?;

    let mut tx = pool.begin().await?;
    if current != SCHEMA_VERSION {
        if current != 0 {
            tracing::warn!(
                found = current,
                expected = SCHEMA_VERSION,
                "Schema version mismatch, dropping characters table"
            );
        }
        sqlx::query("DROP TABLE IF EXISTS characters")
            .execute(&mut *tx)
            .await?;
    }
    sqlx::raw_sql(SCHEMA_SQL).execute(&mut *tx).await?;
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::debug!(version = SCHEMA_VERSION, "Schema ready");
    Ok(())
}

/// Read the version stamped in `PRAGMA user_version` (0 for a fresh file).
pub async fn schema_version(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(pool)
        .await
}
