use std::time::Duration;

use refrd::Config;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connects to the configured PostgreSQL and applies migrations.
///
/// Returns `None` when the database is not reachable, so database-backed
/// tests skip on machines without one instead of failing.
pub async fn try_connect(config: &Config) -> Option<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(2))
        .connect(config.database.connection_string().expose_secret())
        .await
        .ok()?;

    sqlx::migrate!("./migrations").run(&pool).await.ok()?;

    Some(pool)
}

/// Removes rows left behind by a previous run of the named test.
///
/// Tests namespace their data by email prefix (use the test function name)
/// so parallel tests never interfere.
pub async fn cleanup_prefix(pool: &PgPool, prefix: &str) {
    let pattern = format!("{prefix}%");

    sqlx::query("DELETE FROM candidates WHERE email LIKE $1")
        .bind(&pattern)
        .execute(pool)
        .await
        .expect("Failed to clean up candidate test data");

    sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&pattern)
        .execute(pool)
        .await
        .expect("Failed to clean up user test data");
}
