//! Admin authentication route handlers.
//!
//! The same credential flow as the guest login with one extra gate: a
//! valid credential whose role is not Admin receives the generic
//! invalid-credentials error, so the response does not disclose that the
//! account exists but lacks privilege.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use cloud9_cafe_core::Email;

use crate::db::AccountRepository;
use crate::middleware::{OptionalAccount, set_current_account};
use crate::models::CurrentAccount;
use crate::routes::auth::home_for;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Admin login form data.
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for the admin login page.
#[derive(Debug, Deserialize)]
pub struct AdminLoginQuery {
    pub error: Option<String>,
}

/// Admin login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

fn error_message(code: &str) -> String {
    match code {
        "invalid_credentials" => "Invalid email or password.",
        "account_inactive" => "Your account is inactive. Please contact support.",
        "session_expired" => "Your session expired. Please login again.",
        _ => "Unable to login right now. Please try again.",
    }
    .to_string()
}

/// Display the admin login page.
pub async fn login_page(
    OptionalAccount(account): OptionalAccount,
    Query(query): Query<AdminLoginQuery>,
) -> Response {
    if let Some(current) = account {
        return Redirect::to(home_for(current.role)).into_response();
    }

    AdminLoginTemplate {
        error: query.error.as_deref().map(error_message),
        email: String::new(),
    }
    .into_response()
}

/// Handle admin login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AdminLoginForm>,
) -> Response {
    let entered_email = form.email.trim().to_lowercase();

    let render_error = |message: &str| {
        AdminLoginTemplate {
            error: Some(message.to_string()),
            email: entered_email.clone(),
        }
        .into_response()
    };

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
            tracing::error!(error = %e, "Admin login failed");
            return render_error("Unable to login right now. Please try again.");
        }
    };

    // Privilege gate: indistinguishable from a bad credential
    if !account.role.is_admin() {
        return render_error("Invalid email or password.");
    }

    if let Err(e) = session.cycle_id().await {
        tracing::error!(error = %e, "Failed to cycle session id");
        return render_error("Unable to login right now. Please try again.");
    }

    let current = CurrentAccount::for_account(&account);
    if let Err(e) = set_current_account(&session, &current).await {
        tracing::error!(error = %e, "Failed to set session");
        return render_error("Unable to login right now. Please try again.");
    }

    if let Err(e) = AccountRepository::new(state.pool())
        .touch_last_login(account.id)
        .await
    {
        tracing::warn!(error = %e, "Failed to update last login timestamp");
    }

    Redirect::to("/admin").into_response()
}

/// Handle admin logout: destroy the whole session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    Redirect::to("/admin/auth/login").into_response()
}
