//! Account domain types.

use chrono::{DateTime, Utc};

use cloud9_cafe_core::{AccountId, Email, Role};

/// An account (domain type).
///
/// Represents a person who can authenticate, tagged with a role.
/// The password hash is deliberately not part of this type; it is only
/// surfaced by the credential-verification queries.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// The person's full name.
    pub full_name: String,
    /// Email address (unique, lowercase).
    pub email: Email,
    /// Optional phone number, stored as entered.
    pub phone: Option<String>,
    /// Authorization tier.
    pub role: Role,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
    /// When the account last logged in.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new account.
#[derive(Debug)]
pub struct NewAccount<'a> {
    pub full_name: &'a str,
    pub email: &'a Email,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
    pub role: Role,
    pub is_active: bool,
}

/// Fields an administrator may edit on an account (everything except the
/// password).
#[derive(Debug)]
pub struct AccountUpdate<'a> {
    pub full_name: &'a str,
    pub email: &'a Email,
    pub phone: Option<&'a str>,
    pub role: Role,
    pub is_active: bool,
}
