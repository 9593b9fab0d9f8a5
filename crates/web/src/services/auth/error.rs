//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cloud9_cafe_core::EmailError),

    /// Invalid credentials. Covers both "no such account" and "wrong
    /// password" so the two are indistinguishable to callers.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The credentials are valid but the account is deactivated.
    #[error("account inactive")]
    AccountInactive,

    /// The email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Password does not meet the strength rule.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] cloud9_cafe_core::validate::PasswordError),

    /// The supplied current password does not match the stored hash.
    #[error("current password is incorrect")]
    CurrentPasswordMismatch,

    /// The session references an account that no longer exists.
    #[error("account not found")]
    AccountNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
