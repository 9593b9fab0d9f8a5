//! Account role enumeration.

use serde::{Deserialize, Serialize};

/// The authorization tier of an account.
///
/// Stored in the database as text (`'user'` / `'admin'`, enforced by a CHECK
/// constraint). Rows decode through [`std::str::FromStr`], so an unexpected
/// value surfaces as a data-corruption error instead of silently flowing
/// through string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An ordinary customer account.
    User,
    /// An administrator with access to the back office.
    Admin,
}

impl Role {
    /// Whether this role grants access to the admin panel.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Parse a role, falling back to [`Role::User`] for unknown input.
    ///
    /// The admin create/edit forms accept a role from a select element;
    /// anything outside the closed set is treated as the least-privileged
    /// role rather than rejected.
    #[must_use]
    pub fn from_form_value(s: &str) -> Self {
        s.parse().unwrap_or(Self::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [Role::User, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superadmin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_from_form_value_defaults_to_user() {
        assert_eq!(Role::from_form_value("admin"), Role::Admin);
        assert_eq!(Role::from_form_value("user"), Role::User);
        assert_eq!(Role::from_form_value("root"), Role::User);
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
