use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::error::Result;

/// Database connection pool type
pub type DbPool = sqlx::PgPool;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
