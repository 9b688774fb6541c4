//! Database connection and pool management for CoopFund
//!
//! Connection pooling, embedded migrations, and first-run seeding of the
//! default admin account.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::models::{UserRole, UserStatus};

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to run migrations: {0}")]
    MigrationError(String),

    #[error("Failed to seed default data: {0}")]
    SeedError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    tracing::info!("Database migrations completed successfully");

    Ok(())
}

/// Create the default admin account if it does not exist yet
pub async fn seed_default_admin(pool: &PgPool, config: &Config) -> Result<(), DbError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&config.default_admin_email)
        .fetch_optional(pool)
        .await
        .map_err(|e| DbError::SeedError(e.to_string()))?;

    if existing.is_some() {
        tracing::debug!(email = %config.default_admin_email, "Admin user already exists");
        return Ok(());
    }

    let hashed = hash_password(&config.default_admin_password)
        .map_err(|e| DbError::SeedError(e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO users (member_id, email, hashed_password, full_name, phone, role, status)
        VALUES ($1, $2, $3, $4, '', $5, $6)
        "#,
    )
    .bind(&config.default_admin_member_id)
    .bind(&config.default_admin_email)
    .bind(&hashed)
    .bind("System Administrator")
    .bind(UserRole::Admin)
    .bind(UserStatus::Active)
    .execute(pool)
    .await
    .map_err(|e| DbError::SeedError(e.to_string()))?;

    tracing::info!(email = %config.default_admin_email, "Created default admin user");

    Ok(())
}

/// Check database connectivity (for health checks)
pub async fn check_health(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}
