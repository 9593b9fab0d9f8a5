//! Order repository for database operations.
//!
//! Order placement and management screens are out of scope; this
//! repository only answers the two count questions the rest of the site
//! asks: "does this account own order history?" (soft-delete rule) and
//! "how many orders are open?" (dashboard).

use sqlx::PgPool;

use cloud9_cafe_core::AccountId;

use super::RepositoryError;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Number of orders owned by an account.
    ///
    /// Decides soft vs hard delete: an account with any order history is
    /// deactivated instead of removed, preserving referential history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_account(&self, account_id: AccountId) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE account_id = $1")
                .bind(account_id.as_i32())
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Number of orders still being worked (admin dashboard badge).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_open(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE status IN ('pending', 'processing')",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
