//! Database operations for the cafe `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `accounts` - Authentication and identity (users and admins)
//! - `menu_items` - The cafe menu
//! - `contact_messages` - Contact form submissions
//! - `orders` - Order ownership (counted for the soft-delete rule)
//! - `sessions` - Tower-sessions storage
//!
//! Queries use the sqlx runtime API with positional binds; rows decode into
//! private row structs and convert to domain types through `TryFrom`, so
//! invalid stored data surfaces as `RepositoryError::DataCorruption` instead
//! of leaking into handlers.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p cloud9-cafe-cli -- migrate run
//! ```

pub mod accounts;
pub mod contact;
pub mod menu;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::AccountRepository;
pub use contact::ContactMessageRepository;
pub use menu::MenuItemRepository;
pub use orders::OrderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
