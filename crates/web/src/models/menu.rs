//! Menu item domain types.

use chrono::{DateTime, Utc};

use cloud9_cafe_core::{MenuCategory, MenuItemId, Price};

/// A menu item (domain type).
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,
    /// Item name as shown on the menu.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Menu category.
    pub category: MenuCategory,
    /// Price in dollars.
    pub price: Price,
    /// Unavailable items are hidden from the public menu.
    pub is_available: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or updating a menu item.
#[derive(Debug)]
pub struct MenuItemInput<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: MenuCategory,
    pub price: Price,
    pub is_available: bool,
}
