//! Authentication guards and extractors.
//!
//! Guard logic is a pure function from a session snapshot to a
//! [`GuardDecision`]; the extractors are thin adapters that read the
//! session and turn a deny into a redirect. Guards never mutate state and
//! never surface an error to the handler.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use cloud9_cafe_core::Role;

use crate::models::{CurrentAccount, session_keys};

/// Redirect target for unauthenticated visitors to user pages.
pub const GUEST_LOGIN: &str = "/guest/auth/login";
/// Redirect target when a session exists but its payload is unusable.
pub const SESSION_EXPIRED: &str = "/guest/auth/login?error=session_expired";
/// Redirect target for unauthorized visitors to admin pages.
pub const ADMIN_LOGIN: &str = "/admin/auth/login";
/// The user dashboard.
pub const USER_HOME: &str = "/user";
/// The admin dashboard.
pub const ADMIN_HOME: &str = "/admin";

/// Outcome of running a guard against a session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The request may proceed.
    Allow,
    /// The request must be redirected to the given location.
    Redirect(&'static str),
}

/// Gate for pages in the user area.
///
/// No account in the session redirects to the guest login; a session
/// belonging to an admin is sent to the admin dashboard instead. A request
/// that passes holds a session with a user-role account.
#[must_use]
pub fn user_guard(account: Option<&CurrentAccount>) -> GuardDecision {
    match account {
        None => GuardDecision::Redirect(GUEST_LOGIN),
        Some(current) if current.role == Role::Admin => GuardDecision::Redirect(ADMIN_HOME),
        Some(_) => GuardDecision::Allow,
    }
}

/// Gate for pages in the admin area.
///
/// A session is authorized when its admin mirror is set or its role is
/// Admin. The role check runs second so a session with a stale admin
/// mirror but a non-admin role lands on the user dashboard rather than in
/// the back office.
#[must_use]
pub fn admin_guard(account: Option<&CurrentAccount>) -> GuardDecision {
    let Some(current) = account else {
        return GuardDecision::Redirect(ADMIN_LOGIN);
    };

    let has_admin_session = current.admin_id.is_some() || current.role == Role::Admin;
    if !has_admin_session {
        return GuardDecision::Redirect(ADMIN_LOGIN);
    }

    if current.role != Role::Admin {
        return GuardDecision::Redirect(USER_HOME);
    }

    GuardDecision::Allow
}

/// Rejection for guard extractors: always a redirect, never an error page.
pub struct AuthRedirect(&'static str);

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Read the session payload, distinguishing "no session data" from
/// "session data that no longer deserializes" (stale or corrupted).
async fn session_snapshot(parts: &Parts) -> Result<Option<CurrentAccount>, ()> {
    let Some(session) = parts.extensions.get::<Session>() else {
        return Ok(None);
    };

    match session.get::<CurrentAccount>(session_keys::CURRENT_ACCOUNT).await {
        Ok(account) => Ok(account),
        Err(_) => Err(()),
    }
}

/// Extractor that requires a user-role session.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireUser(account): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", account.display_name)
/// }
/// ```
pub struct RequireUser(pub CurrentAccount);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = session_snapshot(parts)
            .await
            .map_err(|()| AuthRedirect(SESSION_EXPIRED))?;

        match user_guard(account.as_ref()) {
            GuardDecision::Allow => {
                // user_guard only allows Some(_)
                account.map(Self).ok_or(AuthRedirect(GUEST_LOGIN))
            }
            GuardDecision::Redirect(target) => Err(AuthRedirect(target)),
        }
    }
}

/// Extractor that requires an admin session.
pub struct RequireAdmin(pub CurrentAccount);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = session_snapshot(parts)
            .await
            .map_err(|()| AuthRedirect(ADMIN_LOGIN))?;

        match admin_guard(account.as_ref()) {
            GuardDecision::Allow => account.map(Self).ok_or(AuthRedirect(ADMIN_LOGIN)),
            GuardDecision::Redirect(target) => Err(AuthRedirect(target)),
        }
    }
}

/// Extractor that optionally gets the current account.
///
/// Unlike the guards, this never rejects: guest pages use it to adapt
/// their navigation and to tag contact messages.
pub struct OptionalAccount(pub Option<CurrentAccount>);

impl<S> FromRequestParts<S> for OptionalAccount
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = session_snapshot(parts).await.unwrap_or_default();
        Ok(Self(account))
    }
}

/// Store the authenticated account in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_account(
    session: &Session,
    account: &CurrentAccount,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_ACCOUNT, account)
        .await
}

#[cfg(test)]
mod tests {
    use cloud9_cafe_core::AccountId;

    use super::*;

    fn session(role: Role, admin_id: Option<i32>) -> CurrentAccount {
        CurrentAccount {
            id: AccountId::new(1),
            display_name: "Avery Quinn".to_string(),
            role,
            phone: None,
            admin_id: admin_id.map(AccountId::new),
        }
    }

    #[test]
    fn test_user_guard_anonymous_redirects_to_login() {
        assert_eq!(user_guard(None), GuardDecision::Redirect(GUEST_LOGIN));
    }

    #[test]
    fn test_user_guard_allows_users() {
        let account = session(Role::User, None);
        assert_eq!(user_guard(Some(&account)), GuardDecision::Allow);
    }

    #[test]
    fn test_user_guard_sends_admins_to_admin_dashboard() {
        let account = session(Role::Admin, Some(1));
        assert_eq!(user_guard(Some(&account)), GuardDecision::Redirect(ADMIN_HOME));
    }

    #[test]
    fn test_admin_guard_anonymous_redirects_to_admin_login() {
        assert_eq!(admin_guard(None), GuardDecision::Redirect(ADMIN_LOGIN));
    }

    #[test]
    fn test_admin_guard_rejects_plain_users() {
        let account = session(Role::User, None);
        assert_eq!(
            admin_guard(Some(&account)),
            GuardDecision::Redirect(ADMIN_LOGIN)
        );
    }

    #[test]
    fn test_admin_guard_allows_admin_role() {
        let account = session(Role::Admin, Some(1));
        assert_eq!(admin_guard(Some(&account)), GuardDecision::Allow);
    }

    #[test]
    fn test_admin_guard_allows_admin_mirror_only_when_role_matches() {
        // Authorized via the mirror, but the role says User: bounced to the
        // user dashboard, not into the back office.
        let account = session(Role::User, Some(1));
        assert_eq!(
            admin_guard(Some(&account)),
            GuardDecision::Redirect(USER_HOME)
        );
    }

    #[test]
    fn test_admin_guard_accepts_role_without_mirror() {
        let account = session(Role::Admin, None);
        assert_eq!(admin_guard(Some(&account)), GuardDecision::Allow);
    }
}
