//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use cloud9_cafe_core::{AccountId, Role};

use super::account::Account;

/// Session-stored identity.
///
/// Captured at login time; the role is NOT re-validated against the
/// database on later requests, so a deactivated account keeps its session
/// until logout or expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAccount {
    /// Account's database ID.
    pub id: AccountId,
    /// Display name cached for page headers; refreshed on profile edit.
    pub display_name: String,
    /// Role at login time.
    pub role: Role,
    /// Phone cached for display; refreshed on profile edit.
    pub phone: Option<String>,
    /// Mirror of `id`, set only when the role is Admin. The admin guard
    /// accepts either this or an Admin role.
    pub admin_id: Option<AccountId>,
}

impl CurrentAccount {
    /// Build the session payload for an authenticated account.
    #[must_use]
    pub fn for_account(account: &Account) -> Self {
        Self {
            id: account.id,
            display_name: account.full_name.clone(),
            role: account.role,
            phone: account.phone.clone(),
            admin_id: account.role.is_admin().then_some(account.id),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in account.
    pub const CURRENT_ACCOUNT: &str = "current_account";
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use cloud9_cafe_core::Email;

    use super::*;

    #[allow(clippy::unwrap_used)]
    fn account(role: Role) -> Account {
        Account {
            id: AccountId::new(7),
            full_name: "Avery Quinn".to_string(),
            email: Email::parse("avery@example.com").unwrap(),
            phone: Some("(555) 123-4567".to_string()),
            role,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_id_mirrors_admin_accounts() {
        let current = CurrentAccount::for_account(&account(Role::Admin));
        assert_eq!(current.admin_id, Some(AccountId::new(7)));
        assert_eq!(current.role, Role::Admin);
    }

    #[test]
    fn test_admin_id_unset_for_user_accounts() {
        let current = CurrentAccount::for_account(&account(Role::User));
        assert_eq!(current.admin_id, None);
        assert_eq!(current.display_name, "Avery Quinn");
    }
}
