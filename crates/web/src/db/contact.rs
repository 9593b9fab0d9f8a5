//! Contact message repository for database operations.

use sqlx::PgPool;

use cloud9_cafe_core::{AccountId, Email};

use super::RepositoryError;

/// Fields for storing a contact form submission.
#[derive(Debug)]
pub struct NewContactMessage<'a> {
    /// The logged-in account, if any.
    pub account_id: Option<AccountId>,
    pub name: &'a str,
    pub email: &'a Email,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Repository for contact message database operations.
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    /// Create a new contact message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact form submission with status `new`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: NewContactMessage<'_>) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO contact_messages (account_id, name, email, subject, message, status)
             VALUES ($1, $2, $3, $4, $5, 'new')",
        )
        .bind(new.account_id.map(|id| id.as_i32()))
        .bind(new.name)
        .bind(new.email.as_str())
        .bind(new.subject)
        .bind(new.message)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Number of unhandled messages (admin dashboard badge).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_new(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE status = 'new'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
