//! Database migration commands.
//!
//! Migrations live in `crates/web/migrations` and are embedded at compile
//! time, so the CLI binary is self-contained.

use chrono::{DateTime, Utc};

use super::{CliError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}

/// Show which migrations have been applied.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable.
pub async fn status() -> Result<(), CliError> {
    let pool = connect().await?;

    let applied = sqlx::query_as::<_, (i64, String, DateTime<Utc>)>(
        "SELECT version, description, installed_on FROM _sqlx_migrations ORDER BY version",
    )
    .fetch_all(&pool)
    .await?;

    if applied.is_empty() {
        tracing::info!("No migrations applied yet");
        return Ok(());
    }

    for (version, description, installed_on) in applied {
        tracing::info!(version, description = %description, installed_on = %installed_on, "applied");
    }

    Ok(())
}
