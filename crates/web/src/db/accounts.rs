//! Account repository for database operations.
//!
//! Provides database access for accounts: credential lookup for login,
//! self-service profile updates, and the admin management queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cloud9_cafe_core::{AccountId, Email, Role};

use super::RepositoryError;
use crate::models::account::{Account, AccountUpdate, NewAccount};

/// Accounts per page on the admin list screen.
pub const PAGE_SIZE: i64 = 10;

const ACCOUNT_COLUMNS: &str =
    "id, full_name, email, phone, role, is_active, last_login_at, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i32,
    full_name: String,
    email: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: Role = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            full_name: row.full_name,
            email,
            phone: row.phone,
            role,
            is_active: row.is_active,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for credential lookup (account plus password hash).
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: i32,
    full_name: String,
    email: String,
    phone: Option<String>,
    role: String,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl TryFrom<CredentialRow> for (Account, String) {
    type Error = RepositoryError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let hash = row.password_hash.clone();
        let account = AccountRow {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            role: row.role,
            is_active: row.is_active,
            last_login_at: row.last_login_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
        .try_into()?;
        Ok((account, hash))
    }
}

// =============================================================================
// List Filter
// =============================================================================

/// Filters for the admin account list.
///
/// The list screen shows ordinary user accounts only; admins are managed
/// through the CLI bootstrap and the create form.
#[derive(Debug, Clone, Default)]
pub struct AccountListFilter {
    /// Substring match over name, email, and phone.
    pub search: Option<String>,
    /// Filter by active flag.
    pub active: Option<bool>,
    /// 1-based page number.
    pub page: i64,
}

impl AccountListFilter {
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"))
    }

    fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * PAGE_SIZE
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an account by its email address.
    ///
    /// Emails are normalized to lowercase on parse, so this is an exact
    /// match that behaves case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an account together with its password hash, by email.
    ///
    /// Returns `None` if no account matches; the caller maps that to the
    /// same generic failure as a bad password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get_with_password(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM accounts WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get just the password hash for an account (password-change flow).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        id: AccountId,
    ) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM accounts WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(hash)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (the unique constraint is the authoritative duplicate check).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewAccount<'_>) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO accounts (full_name, email, phone, password_hash, role, is_active)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(new.full_name)
        .bind(new.email.as_str())
        .bind(new.phone)
        .bind(new.password_hash)
        .bind(new.role.to_string())
        .bind(new.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Whether an email is already registered, optionally excluding one
    /// account (the row being edited).
    ///
    /// This is the UX pre-check only; the unique constraint remains the
    /// source of truth under concurrency.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_taken(
        &self,
        email: &Email,
        exclude: Option<AccountId>,
    ) -> Result<bool, RepositoryError> {
        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM accounts WHERE email = $1 AND ($2::integer IS NULL OR id <> $2) LIMIT 1",
        )
        .bind(email.as_str())
        .bind(exclude.map(|id| id.as_i32()))
        .fetch_optional(self.pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Update an account's own profile fields (name and phone).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: AccountId,
        full_name: &str,
        phone: Option<&str>,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE accounts
             SET full_name = $1, phone = $2, updated_at = now()
             WHERE id = $3
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(full_name)
        .bind(phone)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Replace an account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $1, updated_at = now() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn touch_last_login(&self, id: AccountId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE accounts SET last_login_at = now() WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Admin edit: update every field except the password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Conflict` if the email is already used by
    /// another account.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn admin_update(
        &self,
        id: AccountId,
        update: AccountUpdate<'_>,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE accounts
             SET full_name = $1, email = $2, phone = $3, role = $4, is_active = $5,
                 updated_at = now()
             WHERE id = $6
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(update.full_name)
        .bind(update.email.as_str())
        .bind(update.phone)
        .bind(update.role.to_string())
        .bind(update.is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Set the active flag (soft delete / reactivate).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_active(&self, id: AccountId, active: bool) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE accounts SET is_active = $1, updated_at = now() WHERE id = $2")
                .bind(active)
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Hard-delete an account.
    ///
    /// Only reached when the account owns no orders; accounts with history
    /// are deactivated instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List user-role accounts for the admin screen, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored data is invalid.
    pub async fn list_users(
        &self,
        filter: &AccountListFilter,
    ) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE role = 'user'
               AND ($1::text IS NULL
                    OR full_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1)
               AND ($2::boolean IS NULL OR is_active = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.search_pattern())
        .bind(filter.active)
        .bind(PAGE_SIZE)
        .bind(filter.offset())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Total user-role accounts matching a filter (for pagination).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_users(&self, filter: &AccountListFilter) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts
             WHERE role = 'user'
               AND ($1::text IS NULL
                    OR full_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1)
               AND ($2::boolean IS NULL OR is_active = $2)",
        )
        .bind(filter.search_pattern())
        .bind(filter.active)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_offset_pages_from_one() {
        let mut filter = AccountListFilter::default();
        assert_eq!(filter.offset(), 0);
        filter.page = 1;
        assert_eq!(filter.offset(), 0);
        filter.page = 3;
        assert_eq!(filter.offset(), 20);
        // Out-of-range page numbers clamp to the first page
        filter.page = -5;
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_filter_search_pattern() {
        let filter = AccountListFilter {
            search: Some("  avery ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), Some("%avery%".to_string()));

        let blank = AccountListFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.search_pattern(), None);
        assert_eq!(AccountListFilter::default().search_pattern(), None);
    }
}
