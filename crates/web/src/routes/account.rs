//! User account route handlers.
//!
//! Dashboard, profile edit, and password change. Every handler here sits
//! behind [`RequireUser`], so a session with a user-role account is a
//! precondition.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use cloud9_cafe_core::validate;

use crate::db::AccountRepository;
use crate::middleware::{RequireUser, set_current_account};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Profile edit form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// User dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "user/dashboard.html")]
pub struct DashboardTemplate {
    pub display_name: String,
}

/// Profile form values.
#[derive(Debug, Default)]
pub struct ProfileFormValues {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Profile field errors.
#[derive(Debug, Default)]
pub struct ProfileFieldErrors {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl ProfileFieldErrors {
    fn any(&self) -> bool {
        self.full_name.is_some() || self.phone.is_some()
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "user/profile.html")]
pub struct ProfileTemplate {
    pub display_name: String,
    pub values: ProfileFormValues,
    pub errors: ProfileFieldErrors,
    pub success: Option<String>,
    pub general_error: Option<String>,
}

/// Password change field errors.
#[derive(Debug, Default)]
pub struct PasswordFieldErrors {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl PasswordFieldErrors {
    fn any(&self) -> bool {
        self.current_password.is_some()
            || self.new_password.is_some()
            || self.confirm_password.is_some()
    }
}

/// Password change page template.
#[derive(Template, WebTemplate)]
#[template(path = "user/settings.html")]
pub struct SettingsTemplate {
    pub display_name: String,
    pub errors: PasswordFieldErrors,
    pub success: Option<String>,
    pub general_error: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Display the user dashboard.
pub async fn dashboard(RequireUser(current): RequireUser) -> impl IntoResponse {
    DashboardTemplate {
        display_name: current.display_name,
    }
}

// =============================================================================
// Profile
// =============================================================================

/// Display the profile edit form with the stored values.
pub async fn profile_page(
    RequireUser(current): RequireUser,
    State(state): State<AppState>,
) -> Response {
    let account = match AccountRepository::new(state.pool()).get_by_id(current.id).await {
        Ok(Some(account)) => account,
        Ok(None) => return Redirect::to("/user").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load profile");
            return ProfileTemplate {
                display_name: current.display_name.clone(),
                values: ProfileFormValues {
                    full_name: current.display_name,
                    email: String::new(),
                    phone: current.phone.unwrap_or_default(),
                },
                errors: ProfileFieldErrors::default(),
                success: None,
                general_error: Some("Unable to load your profile. Please try again.".to_string()),
            }
            .into_response();
        }
    };

    ProfileTemplate {
        display_name: account.full_name.clone(),
        values: ProfileFormValues {
            full_name: account.full_name,
            email: account.email.into_inner(),
            phone: account.phone.unwrap_or_default(),
        },
        errors: ProfileFieldErrors::default(),
        success: None,
        general_error: None,
    }
    .into_response()
}

/// Handle profile form submission.
///
/// On success the stored name/phone are replaced and the session's display
/// caches are refreshed; submitting the same values twice stores the same
/// result with `updated_at` advancing.
pub async fn update_profile(
    RequireUser(current): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Response {
    let repo = AccountRepository::new(state.pool());

    let email = match repo.get_by_id(current.id).await {
        Ok(Some(account)) => account.email.into_inner(),
        Ok(None) => return Redirect::to("/user").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load profile for update");
            String::new()
        }
    };

    let values = ProfileFormValues {
        full_name: form.full_name.trim().to_string(),
        email,
        phone: form.phone.trim().to_string(),
    };

    let mut errors = ProfileFieldErrors::default();
    if let Err(e) = validate::full_name(&values.full_name) {
        errors.full_name = Some(e.to_string());
    }
    if let Err(e) = validate::optional_phone(&values.phone) {
        errors.phone = Some(e.to_string());
    }

    if errors.any() {
        return ProfileTemplate {
            display_name: current.display_name,
            values,
            errors,
            success: None,
            general_error: None,
        }
        .into_response();
    }

    let phone = (!values.phone.is_empty()).then_some(values.phone.as_str());
    match repo.update_profile(current.id, &values.full_name, phone).await {
        Ok(account) => {
            // Keep the session's display caches in sync
            let mut refreshed = current;
            refreshed.display_name.clone_from(&account.full_name);
            refreshed.phone.clone_from(&account.phone);
            if let Err(e) = set_current_account(&session, &refreshed).await {
                tracing::warn!(error = %e, "Failed to refresh session after profile update");
            }

            ProfileTemplate {
                display_name: account.full_name.clone(),
                values: ProfileFormValues {
                    full_name: account.full_name,
                    email: account.email.into_inner(),
                    phone: account.phone.unwrap_or_default(),
                },
                errors: ProfileFieldErrors::default(),
                success: Some("Your profile has been updated successfully.".to_string()),
                general_error: None,
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update profile");
            ProfileTemplate {
                display_name: current.display_name,
                values,
                errors,
                success: None,
                general_error: Some("Unable to update your profile. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Password Change
// =============================================================================

/// Display the password change form.
pub async fn settings_page(RequireUser(current): RequireUser) -> impl IntoResponse {
    SettingsTemplate {
        display_name: current.display_name,
        errors: PasswordFieldErrors::default(),
        success: None,
        general_error: None,
    }
}

/// Handle password change submission.
///
/// The current password must verify against the stored hash before any
/// write; the session is left untouched on success (no forced re-login).
pub async fn change_password(
    RequireUser(current): RequireUser,
    State(state): State<AppState>,
    Form(form): Form<PasswordChangeForm>,
) -> Response {
    let mut errors = PasswordFieldErrors::default();

    if form.current_password.is_empty() {
        errors.current_password = Some("Current password is required.".to_string());
    }
    if let Err(e) = validate::password(&form.new_password) {
        errors.new_password = Some(e.to_string());
    }
    if form.confirm_password.is_empty() {
        errors.confirm_password = Some("Please confirm your new password.".to_string());
    } else if form.confirm_password != form.new_password {
        errors.confirm_password = Some("Passwords do not match.".to_string());
    }

    if errors.any() {
        return SettingsTemplate {
            display_name: current.display_name,
            errors,
            success: None,
            general_error: None,
        }
        .into_response();
    }

    let result = AuthService::new(state.pool())
        .change_password(current.id, &form.current_password, &form.new_password)
        .await;

    match result {
        Ok(()) => SettingsTemplate {
            display_name: current.display_name,
            errors: PasswordFieldErrors::default(),
            success: Some("Your password has been changed successfully.".to_string()),
            general_error: None,
        }
        .into_response(),
        Err(AuthError::CurrentPasswordMismatch) => {
            errors.current_password = Some("Current password is incorrect.".to_string());
            SettingsTemplate {
                display_name: current.display_name,
                errors,
                success: None,
                general_error: None,
            }
            .into_response()
        }
        Err(AuthError::AccountNotFound) => SettingsTemplate {
            display_name: current.display_name,
            errors,
            success: None,
            general_error: Some(
                "Unable to verify your identity. Please login again.".to_string(),
            ),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to change password");
            SettingsTemplate {
                display_name: current.display_name,
                errors,
                success: None,
                general_error: Some(
                    "Unable to change your password. Please try again.".to_string(),
                ),
            }
            .into_response()
        }
    }
}
