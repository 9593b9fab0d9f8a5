//! Authentication service.
//!
//! Credential verification, registration, and password changes over the
//! account repository. Field-level form validation happens in the handlers
//! (so each field gets its own message); this service owns everything that
//! touches credentials.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use cloud9_cafe_core::{AccountId, Email, Role, validate};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::models::account::{Account, NewAccount};

/// Fields for a self-registration or admin account creation.
#[derive(Debug)]
pub struct RegistrationInput<'a> {
    pub full_name: &'a str,
    pub email: &'a Email,
    pub phone: Option<&'a str>,
    pub password: &'a str,
    pub role: Role,
    pub is_active: bool,
}

/// Authentication service.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Verify a login attempt.
    ///
    /// A missing account and a failed password verify collapse into the
    /// same `InvalidCredentials` so the response cannot be used to
    /// enumerate registered emails. The active flag is checked only after
    /// the password verifies: an inactive account with the wrong password
    /// still reports invalid credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password is wrong.
    /// Returns `AuthError::AccountInactive` for a deactivated account.
    pub async fn login(&self, email: &Email, password: &str) -> Result<Account, AuthError> {
        let record = self.accounts.get_with_password(email).await?;
        verify_login(record, password)
    }

    /// Register a new account.
    ///
    /// Assumes field-level validation already ran; re-checks the password
    /// strength rule as the last line of defense before hashing. The
    /// duplicate pre-check gives the friendly field error; the unique
    /// constraint on the insert is what actually settles races.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password fails the rule.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(&self, input: RegistrationInput<'_>) -> Result<Account, AuthError> {
        validate::password(input.password)?;

        if self.accounts.email_taken(input.email, None).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(input.password)?;

        let account = self
            .accounts
            .create(NewAccount {
                full_name: input.full_name,
                email: input.email,
                phone: input.phone,
                password_hash: &password_hash,
                role: input.role,
                is_active: input.is_active,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(account)
    }

    /// Change an account's password after proving the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountNotFound` if the session references a
    /// missing account.
    /// Returns `AuthError::CurrentPasswordMismatch` if the current password
    /// does not verify.
    /// Returns `AuthError::WeakPassword` if the new password fails the rule.
    pub async fn change_password(
        &self,
        account_id: AccountId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate::password(new_password)?;

        let stored_hash = self
            .accounts
            .get_password_hash(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        verify_password(current_password, &stored_hash)
            .map_err(|_| AuthError::CurrentPasswordMismatch)?;

        let new_hash = hash_password(new_password)?;
        self.accounts.update_password(account_id, &new_hash).await?;

        Ok(())
    }
}

/// Evaluate a credential lookup result against the supplied password.
///
/// A missing record and a failed verify produce the same error variant;
/// the active flag is only consulted once the password has verified.
fn verify_login(record: Option<(Account, String)>, password: &str) -> Result<Account, AuthError> {
    let (account, password_hash) = record.ok_or(AuthError::InvalidCredentials)?;

    verify_password(password, &password_hash)?;

    if !account.is_active {
        return Err(AuthError::AccountInactive);
    }

    Ok(account)
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on any mismatch, including an
/// unparseable stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use cloud9_cafe_core::AccountId;

    use super::*;

    fn account(is_active: bool) -> Account {
        Account {
            id: AccountId::new(1),
            full_name: "Avery Quinn".to_string(),
            email: Email::parse("avery@example.com").unwrap(),
            phone: None,
            role: Role::User,
            is_active,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
        let hash = hash_password("Abcdef1!").unwrap();

        let unknown_email = verify_login(None, "Abcdef1!").unwrap_err();
        let wrong_password =
            verify_login(Some((account(true), hash)), "Wrong-pass1!").unwrap_err();

        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        // Identical user-facing output follows from the identical variant
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_login_inactive_account_with_correct_password() {
        let hash = hash_password("Abcdef1!").unwrap();
        let result = verify_login(Some((account(false), hash)), "Abcdef1!");
        assert!(matches!(result, Err(AuthError::AccountInactive)));
    }

    #[test]
    fn test_login_inactive_account_with_wrong_password_stays_generic() {
        // The active check runs after verification, so a wrong password on
        // an inactive account does not disclose the inactive state.
        let hash = hash_password("Abcdef1!").unwrap();
        let result = verify_login(Some((account(false), hash)), "Wrong-pass1!");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_login_active_account_with_correct_password() {
        let hash = hash_password("Abcdef1!").unwrap();
        let verified = verify_login(Some((account(true), hash)), "Abcdef1!").unwrap();
        assert_eq!(verified.id, AccountId::new(1));
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert!(verify_password("Abcdef1!", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert!(matches!(
            verify_password("Abcdef1?", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("Abcdef1!", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Abcdef1!").unwrap();
        let b = hash_password("Abcdef1!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_not_reversible_storage() {
        let hash = hash_password("Abcdef1!").unwrap();
        assert!(!hash.contains("Abcdef1!"));
        assert!(hash.starts_with("$argon2"));
    }
}
