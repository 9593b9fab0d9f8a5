//! Admin menu management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use cloud9_cafe_core::{MenuCategory, MenuItemId, Price};

use crate::db::menu::{MenuListFilter, PAGE_SIZE};
use crate::db::{MenuItemRepository, RepositoryError};
use crate::middleware::RequireAdmin;
use crate::models::MenuItem;
use crate::models::menu::MenuItemInput;
use crate::state::AppState;

const NAME_MAX: usize = 120;

// =============================================================================
// Query & Form Types
// =============================================================================

/// Query parameters for the menu list.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub availability: Option<String>,
    pub page: Option<i64>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Create/edit form data.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub is_available: Option<String>,
}

// =============================================================================
// View Types & Templates
// =============================================================================

/// Menu item row for the admin list.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub is_available: bool,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            category: item.category.label().to_string(),
            price: item.price.display(),
            is_available: item.is_available,
        }
    }
}

/// A category option for the select elements.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: String,
    pub label: &'static str,
}

fn category_options() -> Vec<CategoryOption> {
    MenuCategory::ALL
        .iter()
        .map(|&c| CategoryOption {
            value: c.to_string(),
            label: c.label(),
        })
        .collect()
}

/// Menu list page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menu/list.html")]
pub struct ListTemplate {
    pub admin_name: String,
    pub items: Vec<MenuItemView>,
    pub categories: Vec<CategoryOption>,
    pub category: String,
    pub availability: String,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub flash_success: Option<String>,
    pub flash_error: Option<String>,
}

/// Form values preserved across re-renders.
#[derive(Debug, Default)]
pub struct MenuFormValues {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub is_available: bool,
}

/// Field errors for the menu item form.
#[derive(Debug, Default)]
pub struct MenuFieldErrors {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

impl MenuFieldErrors {
    fn any(&self) -> bool {
        self.name.is_some() || self.category.is_some() || self.price.is_some()
    }
}

/// Create page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menu/create.html")]
pub struct CreateTemplate {
    pub admin_name: String,
    pub categories: Vec<CategoryOption>,
    pub values: MenuFormValues,
    pub errors: MenuFieldErrors,
    pub general_error: Option<String>,
}

/// Edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/menu/edit.html")]
pub struct EditTemplate {
    pub admin_name: String,
    pub item_id: i32,
    pub categories: Vec<CategoryOption>,
    pub values: MenuFormValues,
    pub errors: MenuFieldErrors,
    pub general_error: Option<String>,
}

// =============================================================================
// Flash message maps
// =============================================================================

fn success_message(code: &str) -> String {
    match code {
        "created" => "Menu item created successfully.",
        "updated" => "Menu item updated successfully.",
        "deleted" => "Menu item deleted successfully.",
        _ => "Done.",
    }
    .to_string()
}

fn error_message(code: &str) -> String {
    match code {
        "invalid_id" => "Invalid menu item id.",
        "not_found" => "Menu item not found.",
        "fetch_failed" => "Failed to load menu item. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

fn list_url(code: &str) -> String {
    format!("/admin/menu?{code}")
}

fn parse_id(id: i32) -> Result<MenuItemId, Response> {
    if id <= 0 {
        return Err(Redirect::to(&list_url("error=invalid_id")).into_response());
    }
    Ok(MenuItemId::new(id))
}

/// Validate the form and build the typed input, collecting field errors.
fn validate_form(form: &MenuItemForm) -> (MenuFormValues, MenuFieldErrors, Option<(MenuCategory, Price)>) {
    let values = MenuFormValues {
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        category: form.category.trim().to_string(),
        price: form.price.trim().to_string(),
        is_available: form.is_available.is_some(),
    };

    let mut errors = MenuFieldErrors::default();

    if values.name.is_empty() {
        errors.name = Some("Item name is required.".to_string());
    } else if values.name.chars().count() > NAME_MAX {
        errors.name = Some("Item name must not exceed 120 characters.".to_string());
    }

    let category = if values.category.is_empty() {
        errors.category = Some("Category is required.".to_string());
        None
    } else {
        match values.category.parse::<MenuCategory>() {
            Ok(category) => Some(category),
            Err(_) => {
                errors.category = Some("Category is required.".to_string());
                None
            }
        }
    };

    let price = match Price::parse(&values.price) {
        Ok(price) => Some(price),
        Err(e) => {
            errors.price = Some(e.to_string());
            None
        }
    };

    let parsed = match (category, price) {
        (Some(category), Some(price)) if !errors.any() => Some((category, price)),
        _ => None,
    };

    (values, errors, parsed)
}

// =============================================================================
// List
// =============================================================================

/// Display the menu item list with filters and pagination.
pub async fn list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let category = query.category.clone().unwrap_or_default();
    let availability = query.availability.clone().unwrap_or_default();

    let filter = MenuListFilter {
        category: category.parse::<MenuCategory>().ok(),
        available: match availability.as_str() {
            "available" => Some(true),
            "unavailable" => Some(false),
            _ => None,
        },
        page,
    };

    let repo = MenuItemRepository::new(state.pool());
    let (items, total, mut flash_error) = match (
        repo.list_all(&filter).await,
        repo.count_all(&filter).await,
    ) {
        (Ok(items), Ok(total)) => (items, total, None),
        (items, total) => {
            let e = items.err().or_else(|| total.err());
            tracing::error!(error = ?e, "Failed to load menu list");
            (
                Vec::new(),
                0,
                Some("Failed to load menu items. Please try again.".to_string()),
            )
        }
    };

    if flash_error.is_none() {
        flash_error = query.error.as_deref().map(error_message);
    }

    let total_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page_url = |p: i64| {
        format!(
            "/admin/menu?category={}&availability={}&page={p}",
            urlencoding::encode(&category),
            urlencoding::encode(&availability),
        )
    };
    let prev_url = (page > 1).then(|| page_url(page - 1));
    let next_url = (page < total_pages).then(|| page_url(page + 1));

    ListTemplate {
        admin_name: admin.display_name,
        items: items.iter().map(MenuItemView::from).collect(),
        categories: category_options(),
        category,
        availability,
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
        categories: category_options(),
        values: MenuFormValues {
            is_available: true,
            ..Default::default()
        },
        errors: MenuFieldErrors::default(),
        general_error: None,
    }
}

/// Handle create form submission.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let (values, errors, parsed) = validate_form(&form);

    let Some((category, price)) = parsed else {
        return CreateTemplate {
            admin_name: admin.display_name,
            categories: category_options(),
            values,
            errors,
            general_error: None,
        }
        .into_response();
    };

    let result = MenuItemRepository::new(state.pool())
        .create(MenuItemInput {
            name: &values.name,
            description: (!values.description.is_empty()).then_some(values.description.as_str()),
            category,
            price,
            is_available: values.is_available,
        })
        .await;

    match result {
        Ok(_) => Redirect::to(&list_url("success=created")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create menu item");
            CreateTemplate {
                admin_name: admin.display_name,
                categories: category_options(),
                values,
                errors,
                general_error: Some("Failed to create menu item. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Display the edit form with the stored values.
pub async fn edit_page(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    let item = match MenuItemRepository::new(state.pool()).get_by_id(id).await {
        Ok(Some(item)) => item,
        Ok(None) => return Redirect::to(&list_url("error=not_found")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load menu item");
            return Redirect::to(&list_url("error=fetch_failed")).into_response();
        }
    };

    EditTemplate {
        admin_name: admin.display_name,
        item_id: item.id.as_i32(),
        categories: category_options(),
        values: MenuFormValues {
            name: item.name,
            description: item.description.unwrap_or_default(),
            category: item.category.to_string(),
            price: item.price.display(),
            is_available: item.is_available,
        },
        errors: MenuFieldErrors::default(),
        general_error: None,
    }
    .into_response()
}

/// Handle edit form submission.
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<MenuItemForm>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    let (values, errors, parsed) = validate_form(&form);

    let Some((category, price)) = parsed else {
        return EditTemplate {
            admin_name: admin.display_name,
            item_id: id.as_i32(),
            categories: category_options(),
            values,
            errors,
            general_error: None,
        }
        .into_response();
    };

    let result = MenuItemRepository::new(state.pool())
        .update(
            id,
            MenuItemInput {
                name: &values.name,
                description: (!values.description.is_empty())
                    .then_some(values.description.as_str()),
                category,
                price,
                is_available: values.is_available,
            },
        )
        .await;

    match result {
        Ok(_) => Redirect::to(&list_url("success=updated")).into_response(),
        Err(RepositoryError::NotFound) => {
            Redirect::to(&list_url("error=not_found")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update menu item");
            EditTemplate {
                admin_name: admin.display_name,
                item_id: id.as_i32(),
                categories: category_options(),
                values,
                errors,
                general_error: Some("Failed to update menu item. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Delete
// =============================================================================

/// Handle menu item deletion.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(redirect) => return redirect,
    };

    match MenuItemRepository::new(state.pool()).delete(id).await {
        Ok(()) => Redirect::to(&list_url("success=deleted")).into_response(),
        Err(RepositoryError::NotFound) => {
            Redirect::to(&list_url("error=not_found")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete menu item");
            Redirect::to(&list_url("error=fetch_failed")).into_response()
        }
    }
}
