//! Menu item repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cloud9_cafe_core::{MenuCategory, MenuItemId, Price};

use super::RepositoryError;
use crate::models::menu::{MenuItem, MenuItemInput};

/// Menu items per page on the admin list screen.
pub const PAGE_SIZE: i64 = 10;

const MENU_COLUMNS: &str =
    "id, name, description, category, price, is_available, created_at, updated_at";

/// Internal row type for menu item queries.
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i32,
    name: String,
    description: Option<String>,
    category: String,
    price: Decimal,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = RepositoryError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let category: MenuCategory = row.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;
        let price = Price::try_from(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            description: row.description,
            category,
            price,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Filters for the admin menu list.
#[derive(Debug, Clone, Default)]
pub struct MenuListFilter {
    /// Filter by category.
    pub category: Option<MenuCategory>,
    /// Filter by availability.
    pub available: Option<bool>,
    /// 1-based page number.
    pub page: i64,
}

impl MenuListFilter {
    fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * PAGE_SIZE
    }
}

/// Repository for menu item database operations.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Items shown on the public menu: available only, grouped by the
    /// caller into category sections.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored data is invalid.
    pub async fn list_available(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items
             WHERE is_available = TRUE
             ORDER BY category ASC, name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List all items for the admin screen, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored data is invalid.
    pub async fn list_all(
        &self,
        filter: &MenuListFilter,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items
             WHERE ($1::text IS NULL OR category = $1)
               AND ($2::boolean IS NULL OR is_available = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(filter.category.map(|c| c.to_string()))
        .bind(filter.available)
        .bind(PAGE_SIZE)
        .bind(filter.offset())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Total items matching a filter (for pagination).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self, filter: &MenuListFilter) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM menu_items
             WHERE ($1::text IS NULL OR category = $1)
               AND ($2::boolean IS NULL OR is_available = $2)",
        )
        .bind(filter.category.map(|c| c.to_string()))
        .bind(filter.available)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Get a menu item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the returned row is invalid.
    pub async fn create(&self, input: MenuItemInput<'_>) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "INSERT INTO menu_items (name, description, category, price, is_available)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.category.to_string())
        .bind(input.price.as_decimal())
        .bind(input.is_available)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Update a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: MenuItemId,
        input: MenuItemInput<'_>,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "UPDATE menu_items
             SET name = $1, description = $2, category = $3, price = $4,
                 is_available = $5, updated_at = now()
             WHERE id = $6
             RETURNING {MENU_COLUMNS}"
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.category.to_string())
        .bind(input.price.as_decimal())
        .bind(input.is_available)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
