use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppResult, DBError};

pub type CategoryId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Shared lookup for every handler that works inside a category.
pub async fn find_category(pool: &SqlitePool, category_id: CategoryId) -> AppResult<Category> {
    let category =
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(pool)
            .await?;

    category.ok_or(DBError::NotFound.into())
}

pub async fn list_categories(pool: &SqlitePool) -> AppResult<Vec<Category>> {
    Ok(
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn create_category(pool: &SqlitePool, name: &str) -> AppResult<CategoryId> {
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
