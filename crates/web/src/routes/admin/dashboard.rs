//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::db::accounts::AccountListFilter;
use crate::db::menu::MenuListFilter;
use crate::db::{AccountRepository, ContactMessageRepository, MenuItemRepository, OrderRepository};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Row counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardStats {
    pub users: i64,
    pub menu_items: i64,
    pub new_messages: i64,
    pub open_orders: i64,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub stats: DashboardStats,
}

/// Display the admin dashboard.
///
/// Each count degrades independently: a failing query logs and renders as
/// zero rather than taking the whole dashboard down.
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let pool = state.pool();
    let mut stats = DashboardStats::default();

    match AccountRepository::new(pool)
        .count_users(&AccountListFilter::default())
        .await
    {
        Ok(count) => stats.users = count,
        Err(e) => tracing::error!(error = %e, "Failed to count users"),
    }

    match MenuItemRepository::new(pool)
        .count_all(&MenuListFilter::default())
        .await
    {
        Ok(count) => stats.menu_items = count,
        Err(e) => tracing::error!(error = %e, "Failed to count menu items"),
    }

    match ContactMessageRepository::new(pool).count_new().await {
        Ok(count) => stats.new_messages = count,
        Err(e) => tracing::error!(error = %e, "Failed to count contact messages"),
    }

    match OrderRepository::new(pool).count_open().await {
        Ok(count) => stats.open_orders = count,
        Err(e) => tracing::error!(error = %e, "Failed to count open orders"),
    }

    DashboardTemplate {
        admin_name: admin.display_name,
        stats,
    }
}
