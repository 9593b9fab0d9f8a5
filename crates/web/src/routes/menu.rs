//! Public menu route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use cloud9_cafe_core::MenuCategory;

use crate::db::MenuItemRepository;
use crate::error::Result;
use crate::middleware::OptionalAccount;
use crate::models::MenuItem;
use crate::state::AppState;

/// One menu item on the public menu.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub name: String,
    pub description: String,
    pub price: String,
}

/// A category section on the public menu.
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: Vec<MenuItemView>,
}

/// Public menu template.
#[derive(Template, WebTemplate)]
#[template(path = "guest/menu.html")]
pub struct MenuTemplate {
    pub logged_in: bool,
    pub sections: Vec<MenuSection>,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item
                .description
                .clone()
                .unwrap_or_else(|| "Freshly prepared by Cloud 9 Cafe.".to_string()),
            price: item.price.display(),
        }
    }
}

/// Display the public menu: available items grouped by category.
pub async fn menu(
    State(state): State<AppState>,
    OptionalAccount(account): OptionalAccount,
) -> Result<impl IntoResponse> {
    let items = MenuItemRepository::new(state.pool()).list_available().await?;

    let sections = MenuCategory::ALL
        .iter()
        .map(|&category| MenuSection {
            title: category.label(),
            items: items
                .iter()
                .filter(|item| item.category == category)
                .map(MenuItemView::from)
                .collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect();

    Ok(MenuTemplate {
        logged_in: account.is_some(),
        sections,
    })
}
