//! Admin user management route handlers.
//!
//! List, create, view, edit, delete, and activate/deactivate accounts.
//! Failures that abandon the current page redirect back to the list with a
//! coded reason; each code maps to one fixed message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use cloud9_cafe_core::{AccountId, Email, Role, validate};

use crate::db::accounts::{AccountListFilter, PAGE_SIZE};
use crate::db::{AccountRepository, OrderRepository, RepositoryError};
use crate::middleware::RequireAdmin;
use crate::models::Account;
use crate::services::auth::{AuthError, AuthService, RegistrationInput};
use crate::state::AppState;

// =============================================================================
// Query & Form Types
// =============================================================================

/// Query parameters for the account list.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Create form data.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_active: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Edit form data (no password fields).
#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_active: Option<String>,
}

// =============================================================================
// View Types & Templates
// =============================================================================

/// Account row for the list and detail templates.
#[derive(Debug, Clone)]
pub struct AccountView {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: String,
    pub created_at: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.as_i32(),
            full_name: account.full_name.clone(),
            email: account.email.to_string(),
            phone: account.phone.clone().unwrap_or_default(),
            role: account.role.to_string(),
            is_active: account.is_active,
            last_login_at: account
                .last_login_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "Never".to_string()),
            created_at: account.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Account list page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users/list.html")]
pub struct ListTemplate {
    pub admin_name: String,
    pub users: Vec<AccountView>,
    pub search: String,
    pub status: String,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub flash_success: Option<String>,
    pub flash_error: Option<String>,
}

/// Account form values shared by create and edit.
#[derive(Debug, Default)]
pub struct AccountFormValues {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
}

/// Field errors shared by create and edit.
#[derive(Debug, Default)]
pub struct AccountFieldErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl AccountFieldErrors {
    fn any(&self) -> bool {
        self.full_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.password.is_some()
            || self.confirm_password.is_some()
    }
}

/// Create page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users/create.html")]
pub struct CreateTemplate {
    pub admin_name: String,
    pub values: AccountFormValues,
    pub errors: AccountFieldErrors,
    pub general_error: Option<String>,
}

/// Edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users/edit.html")]
pub struct EditTemplate {
    pub admin_name: String,
    pub user_id: i32,
    pub values: AccountFormValues,
    pub errors: AccountFieldErrors,
    pub general_error: Option<String>,
}

/// Detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users/view.html")]
pub struct ViewTemplate {
    pub admin_name: String,
    pub user: AccountView,
}

// =============================================================================
// Flash message maps
// =============================================================================

fn success_message(code: &str) -> String {
    match code {
        "created" => "User created successfully.",
        "updated" => "User updated successfully.",
        "deleted" => "User deleted successfully.",
        "deactivated" => "User has orders. Account deactivated instead of deleted.",
        _ => "Done.",
    }
    .to_string()
}

fn error_message(code: &str) -> String {
    match code {
        "invalid_id" => "Invalid user id.",
        "not_found" => "User not found.",
        "fetch_failed" => "Failed to load user. Please try again.",
        "cannot_edit_self" => "You cannot edit your own account through this page.",
        "cannot_delete_self" => "You cannot delete your own account.",
        "delete_failed" => "Failed to delete user. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn list_url(code: &str) -> String {
    format!("/admin/users?{code}")
}

fn parse_id(id: i32) -> Result<AccountId, Response> {
    if id <= 0 {
        return Err(Redirect::to(&list_url("error=invalid_id")).into_response());
    }
    Ok(AccountId::new(id))
}

// =============================================================================
// List
// =============================================================================

/// Display the account list with search, status filter, and pagination.
///
/// Only user-role accounts are listed; admin accounts are managed through
/// the create form and the CLI bootstrap.
pub async fn list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let search = query.search.clone().unwrap_or_default();
    let status = query.status.clone().unwrap_or_default();

    let filter = AccountListFilter {
        search: (!search.trim().is_empty()).then(|| search.trim().to_string()),
        active: match status.as_str() {
            "active" => Some(true),
            "inactive" => Some(false),
            _ => None,
        },
        page,
    };

    let repo = AccountRepository::new(state.pool());
    let (users, total, mut flash_error) = match (
        repo.list_users(&filter).await,
        repo.count_users(&filter).await,
    ) {
        (Ok(users), Ok(total)) => (users, total, None),
        (users, total) => {
            let e = users.err().or_else(|| total.err());
            tracing::error!(error = ?e, "Failed to load account list");
            (
                Vec::new(),
                0,
                Some("Failed to load users. Please try again.".to_string()),
            )
        }
    };

    if flash_error.is_none() {
        flash_error = query.error.as_deref().map(error_message);
    }

    let total_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page_url = |p: i64| {
        format!(
            "/admin/users?search={}&status={}&page={p}",
            urlencoding::encode(search.trim()),
            urlencoding::encode(&status),
        )
    };
    let prev_url = (page > 1).then(|| page_url(page - 1));
    let next_url = (page < total_pages).then(|| page_url(page + 1));

    ListTemplate {
        admin_name: admin.display_name,
        users: users.iter().map(AccountView::from).collect(),
        search: search.trim().to_string(),
        status,
        page,
        total_pages,
        total,
        prev_url,
        next_url,
        flash_success: query.success.as_deref().map(success_message),
        flash_error,
    }
    .into_response()
}

// =============================================================================
// Create
// =============================================================================

/// Display the create form.
pub async fn create_page(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
    CreateTemplate {
        admin_name: admin.display_name,
        values: AccountFormValues {
            role: Role::User.to_string(),
            is_active: true,
            ..Default::default()
        },
        errors: AccountFieldErrors::default(),
        general_error: None,
    }
}

/// Handle create form submission.
///
/// Registration field rules plus a selectable role and active flag; the
/// admin chooses the initial password.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CreateForm>,
) -> Response {
    // Unknown role input degrades to the least-privileged role
    let role = Role::from_form_value(&form.role);
    let values = AccountFormValues {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
        role: role.to_string(),
        is_active: form.is_active.is_some(),
    };

    let mut errors = AccountFieldErrors::default();
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
    if let Err(e) = validate::optional_phone(&values.phone) {
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

    let email = match (errors.any(), email) {
        (false, Some(email)) => email,
        _ => {
            return CreateTemplate {
                admin_name: admin.display_name,
                values,
                errors,
                general_error: None,
            }
            .into_response();
        }
    };

    let result = AuthService::new(state.pool())
        .register(RegistrationInput {
            full_name: &values.full_name,
            email: &email,
            phone: (!values.phone.is_empty()).then_some(values.phone.as_str()),
            password: &form.password,
            role,
            is_active: values.is_active,
        })
        .await;

    match result {
        Ok(_) => Redirect::to(&list_url("success=created")).into_response(),
        Err(AuthError::EmailTaken) => {
            errors.email = Some("This email is already registered.".to_string());
            CreateTemplate {
                admin_name: admin.display_name,
                values,
                errors,
                general_error: None,
            }
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            CreateTemplate {
                admin_name: admin.display_name,
                values,
                errors,
                general_error: Some("Failed to create user. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// Display a single account.
pub async fn view(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    match AccountRepository::new(state.pool()).get_by_id(id).await {
        Ok(Some(account)) => ViewTemplate {
            admin_name: admin.display_name,
            user: AccountView::from(&account),
        }
        .into_response(),
        Ok(None) => Redirect::to(&list_url("error=not_found")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user");
            Redirect::to(&list_url("error=fetch_failed")).into_response()
        }
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Fetch the edit target, enforcing the id/self/exists preconditions.
async fn edit_target(
    state: &AppState,
    admin: &crate::models::CurrentAccount,
    id: i32,
) -> Result<Account, Response> {
    let id = parse_id(id)?;

    // The authenticated admin's own account is off limits here
    if id == admin.id {
        return Err(Redirect::to(&list_url("error=cannot_edit_self")).into_response());
    }

    match AccountRepository::new(state.pool()).get_by_id(id).await {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(Redirect::to(&list_url("error=not_found")).into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user for edit");
            Err(Redirect::to(&list_url("error=fetch_failed")).into_response())
        }
    }
}

/// Display the edit form with the stored values.
pub async fn edit_page(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let account = match edit_target(&state, &admin, id).await {
        Ok(account) => account,
        Err(redirect) => return redirect,
    };

    EditTemplate {
        admin_name: admin.display_name,
        user_id: account.id.as_i32(),
        values: AccountFormValues {
            full_name: account.full_name,
            email: account.email.into_inner(),
            phone: account.phone.unwrap_or_default(),
            role: account.role.to_string(),
            is_active: account.is_active,
        },
        errors: AccountFieldErrors::default(),
        general_error: None,
    }
    .into_response()
}

/// Handle edit form submission.
///
/// Every field except the password is editable. The duplicate-email check
/// excludes the row being edited.
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<EditForm>,
) -> Response {
    let account = match edit_target(&state, &admin, id).await {
        Ok(account) => account,
        Err(redirect) => return redirect,
    };
    let target_id = account.id;

    let role = Role::from_form_value(&form.role);
    let values = AccountFormValues {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        phone: form.phone.trim().to_string(),
        role: role.to_string(),
        is_active: form.is_active.is_some(),
    };

    let mut errors = AccountFieldErrors::default();
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
    if let Err(e) = validate::optional_phone(&values.phone) {
        errors.phone = Some(e.to_string());
    }

    let render = |errors: AccountFieldErrors, general_error: Option<String>| {
        EditTemplate {
            admin_name: admin.display_name.clone(),
            user_id: target_id.as_i32(),
            values: AccountFormValues {
                full_name: values.full_name.clone(),
                email: values.email.clone(),
                phone: values.phone.clone(),
                role: values.role.clone(),
                is_active: values.is_active,
            },
            errors,
            general_error,
        }
        .into_response()
    };

    let email = match (errors.any(), email) {
        (false, Some(email)) => email,
        _ => return render(errors, None),
    };

    let repo = AccountRepository::new(state.pool());

    // UX pre-check; the unique constraint still decides under races
    match repo.email_taken(&email, Some(target_id)).await {
        Ok(true) => {
            errors.email =
                Some("This email is already registered by another user.".to_string());
            return render(errors, None);
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed duplicate email check");
            return render(errors, Some("Failed to update user. Please try again.".to_string()));
        }
    }

    let result = repo
        .admin_update(
            target_id,
            crate::models::account::AccountUpdate {
                full_name: &values.full_name,
                email: &email,
                phone: (!values.phone.is_empty()).then_some(values.phone.as_str()),
                role,
                is_active: values.is_active,
            },
        )
        .await;

    match result {
        Ok(_) => Redirect::to(&list_url("success=updated")).into_response(),
        Err(RepositoryError::Conflict(_)) => {
            errors.email =
                Some("This email is already registered by another user.".to_string());
            render(errors, None)
        }
        Err(RepositoryError::NotFound) => {
            Redirect::to(&list_url("error=not_found")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update user");
            render(errors, Some("Failed to update user. Please try again.".to_string()))
        }
    }
}

// =============================================================================
// Delete & Toggle
// =============================================================================

/// Handle account deletion.
///
/// Soft-deletes (deactivates) accounts that own order history, preserving
/// referential history; hard-deletes otherwise. Self-deletion is blocked.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    if id == admin.id {
        return Redirect::to(&list_url("error=cannot_delete_self")).into_response();
    }

    let orders = match OrderRepository::new(state.pool()).count_for_account(id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, "Failed to count orders before delete");
            return Redirect::to(&list_url("error=delete_failed")).into_response();
        }
    };

    let repo = AccountRepository::new(state.pool());
    let result = if orders > 0 {
        repo.set_active(id, false).await.map(|()| "success=deactivated")
    } else {
        repo.delete(id).await.map(|()| "success=deleted")
    };

    match result {
        Ok(code) => Redirect::to(&list_url(code)).into_response(),
        Err(RepositoryError::NotFound) => {
            Redirect::to(&list_url("error=not_found")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete user");
            Redirect::to(&list_url("error=delete_failed")).into_response()
        }
    }
}

/// Handle the activate/deactivate toggle. Self-deactivation is blocked.
pub async fn toggle_active(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    if id == admin.id {
        return Redirect::to(&list_url("error=cannot_edit_self")).into_response();
    }

    let repo = AccountRepository::new(state.pool());
    let account = match repo.get_by_id(id).await {
        Ok(Some(account)) => account,
        Ok(None) => return Redirect::to(&list_url("error=not_found")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user for toggle");
            return Redirect::to(&list_url("error=fetch_failed")).into_response();
        }
    };

    match repo.set_active(id, !account.is_active).await {
        Ok(()) => Redirect::to(&list_url("success=updated")).into_response(),
        Err(RepositoryError::NotFound) => {
            Redirect::to(&list_url("error=not_found")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to toggle user status");
            Redirect::to(&list_url("error=fetch_failed")).into_response()
        }
    }
}
