//! Guest authentication route handlers.
//!
//! Login, registration, and logout. Validation failures re-render the form
//! inline; guard redirects arrive with an error code in the query string
//! and are mapped to fixed messages here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tower_sessions::Session;

use cloud9_cafe_core::{Email, Role, validate};

use crate::middleware::{OptionalAccount, set_current_account};
use crate::models::CurrentAccount;
use crate::services::auth::{AuthError, AuthService, RegistrationInput};
use crate::state::AppState;

/// Remember-me cookie name.
pub const REMEMBER_COOKIE: &str = "remember_email";

/// Remember-me cookie lifetime.
const REMEMBER_DAYS: i64 = 30;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Query parameters for the login page (guard redirects and the
/// post-registration notice).
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub registered: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub remember_checked: bool,
}

/// Preserved registration values (passwords are never echoed back).
#[derive(Debug, Default)]
pub struct RegisterFormValues {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Field-scoped registration errors.
#[derive(Debug, Default)]
pub struct RegisterFieldErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegisterFieldErrors {
    fn any(&self) -> bool {
        self.full_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.password.is_some()
            || self.confirm_password.is_some()
    }
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub values: RegisterFormValues,
    pub errors: RegisterFieldErrors,
    pub general_error: Option<String>,
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Where an authenticated session belongs.
pub fn home_for(role: Role) -> &'static str {
    if role.is_admin() { "/admin" } else { "/user" }
}

/// Map a login redirect code to its fixed message.
fn login_error_message(code: &str) -> String {
    match code {
        "invalid_credentials" => "Invalid email or password.",
        "account_inactive" => "Your account is inactive. Please contact support.",
        "session_expired" => "Your session expired. Please login again.",
        _ => "Unable to login right now. Please try again.",
    }
    .to_string()
}

/// Build the remember-me cookie for a successful opted-in login.
fn remember_cookie(email: &Email, secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE, email.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::days(REMEMBER_DAYS))
        .build()
}

/// Build an expired remember-me cookie (clears it on opt-out).
fn clear_remember_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors are sent to their dashboard. The email
/// field is prefilled from the remember-me cookie.
pub async fn login_page(
    OptionalAccount(account): OptionalAccount,
    Query(query): Query<LoginQuery>,
    jar: CookieJar,
) -> Response {
    if let Some(current) = account {
        return Redirect::to(home_for(current.role)).into_response();
    }

    let remembered = jar
        .get(REMEMBER_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty());

    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query
            .registered
            .filter(|v| v.as_str() == "1")
            .map(|_| "Registration successful. Please login to continue.".to_string()),
        remember_checked: remembered.is_some(),
        email: remembered.unwrap_or_default(),
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let remember = form.remember_me.is_some();
    let entered_email = form.email.trim().to_lowercase();

    let render_error = |message: &str| {
        LoginTemplate {
            error: Some(message.to_string()),
            success: None,
            email: entered_email.clone(),
            remember_checked: remember,
        }
        .into_response()
    };

    // Pre-database validation: no query runs for malformed input
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => return render_error("Please enter a valid email address."),
    };
    if form.password.is_empty() {
        return render_error("Password is required.");
    }

    let account = match AuthService::new(state.pool())
        .login(&email, &form.password)
        .await
    {
        Ok(account) => account,
        Err(AuthError::InvalidCredentials) => return render_error("Invalid email or password."),
        Err(AuthError::AccountInactive) => {
            return render_error("Your account is inactive. Please contact support.");
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            return render_error("Unable to login right now. Please try again.");
        }
    };

    // Fresh session id on privilege change (fixation resistance)
    if let Err(e) = session.cycle_id().await {
        tracing::error!(error = %e, "Failed to cycle session id");
        return render_error("Unable to login right now. Please try again.");
    }

    let current = CurrentAccount::for_account(&account);
    if let Err(e) = set_current_account(&session, &current).await {
        tracing::error!(error = %e, "Failed to set session");
        return render_error("Unable to login right now. Please try again.");
    }

    // Best effort; the login itself has already succeeded
    if let Err(e) = crate::db::AccountRepository::new(state.pool())
        .touch_last_login(account.id)
        .await
    {
        tracing::warn!(error = %e, "Failed to update last login timestamp");
    }

    let secure = state.config().is_secure();
    let jar = if remember {
        jar.add(remember_cookie(&account.email, secure))
    } else {
        jar.add(clear_remember_cookie(secure))
    };

    (jar, Redirect::to(home_for(account.role))).into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAccount(account): OptionalAccount) -> Response {
    if let Some(current) = account {
        return Redirect::to(home_for(current.role)).into_response();
    }

    RegisterTemplate {
        values: RegisterFormValues::default(),
        errors: RegisterFieldErrors::default(),
        general_error: None,
    }
    .into_response()
}

/// Handle registration form submission.
///
/// All rules are enforced here regardless of any client-side mirror. On
/// failure the form re-renders preserving name/email/phone; the password
/// fields are never echoed back.
pub async fn register(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Some(current) = account {
        return Redirect::to(home_for(current.role)).into_response();
    }

    let values = RegisterFormValues {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
    };

    let mut errors = RegisterFieldErrors::default();

    if let Err(e) = validate::full_name(&values.full_name) {
        errors.full_name = Some(e.to_string());
    }
    let email = match Email::parse(&values.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.email = Some(e.to_string());
            None
        }
    };
    if let Err(e) = validate::phone(&values.phone) {
        errors.phone = Some(e.to_string());
    }
    if let Err(e) = validate::password(&form.password) {
        errors.password = Some(e.to_string());
    }
    if form.confirm_password.is_empty() {
        errors.confirm_password = Some("Confirm password is required.".to_string());
    } else if form.confirm_password != form.password {
        errors.confirm_password = Some("Passwords do not match.".to_string());
    }

    if errors.any() {
        return RegisterTemplate {
            values,
            errors,
            general_error: None,
        }
        .into_response();
    }

    let Some(email) = email else {
        return RegisterTemplate {
            values,
            errors,
            general_error: None,
        }
        .into_response();
    };

    // Self-registration is always an active user account
    let result = AuthService::new(state.pool())
        .register(RegistrationInput {
            full_name: &values.full_name,
            email: &email,
            phone: Some(values.phone.as_str()),
            password: &form.password,
            role: Role::User,
            is_active: true,
        })
        .await;

    match result {
        Ok(_) => Redirect::to("/guest/auth/login?registered=1").into_response(),
        Err(AuthError::EmailTaken) => {
            errors.email = Some("This email is already registered.".to_string());
            RegisterTemplate {
                values,
                errors,
                general_error: None,
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            RegisterTemplate {
                values,
                errors,
                general_error: Some(
                    "Registration failed due to a server issue. Please try again.".to_string(),
                ),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout: destroy the whole session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    Redirect::to("/").into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_home_for_routes_by_role() {
        assert_eq!(home_for(Role::Admin), "/admin");
        assert_eq!(home_for(Role::User), "/user");
    }

    #[test]
    fn test_login_error_codes_map_to_fixed_messages() {
        assert_eq!(
            login_error_message("invalid_credentials"),
            "Invalid email or password."
        );
        assert_eq!(
            login_error_message("account_inactive"),
            "Your account is inactive. Please contact support."
        );
        assert_eq!(
            login_error_message("session_expired"),
            "Your session expired. Please login again."
        );
        // Unknown codes fall back to a generic message
        assert_eq!(
            login_error_message("anything_else"),
            "Unable to login right now. Please try again."
        );
    }

    #[test]
    fn test_remember_cookie_attributes() {
        let email = Email::parse("customer@example.com").unwrap();
        let cookie = remember_cookie(&email, true);

        assert_eq!(cookie.name(), REMEMBER_COOKIE);
        assert_eq!(cookie.value(), "customer@example.com");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_remember_cookie(false);
        assert_eq!(cookie.name(), REMEMBER_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
