//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! c9-cli admin create -e admin@example.com -n "Admin Name" -p 'S3cure!pass'
//! ```
//!
//! # Environment Variables
//!
//! - `CAFE_DATABASE_URL` - `PostgreSQL` connection string

use cloud9_cafe_core::{Email, Role, validate};
use cloud9_cafe_web::db::{AccountRepository, RepositoryError};
use cloud9_cafe_web::models::account::NewAccount;
use cloud9_cafe_web::services::auth::hash_password;

use super::{CliError, connect};

/// Create a new admin account.
///
/// The password must satisfy the same strength rule the site enforces.
///
/// # Errors
///
/// Returns `CliError` for invalid input, a duplicate email, or a database
/// failure.
pub async fn create(
    email: &str,
    name: &str,
    password: &str,
    phone: Option<&str>,
) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    validate::full_name(name).map_err(|e| CliError::Repository(e.to_string()))?;
    validate::password(password).map_err(|e| CliError::WeakPassword(e.to_string()))?;
    if let Some(phone) = phone {
        validate::phone(phone).map_err(|e| CliError::Repository(e.to_string()))?;
    }

    let password_hash =
        hash_password(password).map_err(|e| CliError::Repository(e.to_string()))?;

    let pool = connect().await?;

    tracing::info!(email = %email, "Creating admin account");

    let account = AccountRepository::new(&pool)
        .create(NewAccount {
            full_name: name,
            email: &email,
            phone,
            password_hash: &password_hash,
            role: Role::Admin,
            is_active: true,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => CliError::AccountExists(email.to_string()),
            RepositoryError::Database(db) => CliError::Database(db),
            other => CliError::Repository(other.to_string()),
        })?;

    tracing::info!(id = %account.id, "Admin account created");

    Ok(())
}
