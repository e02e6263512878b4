use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppResult, DBError};

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Author summary embedded in articles and comments.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Author {
    #[sqlx(rename = "author_id")]
    pub id: UserId,
    #[sqlx(rename = "author_username")]
    pub username: String,
}

pub async fn get_user(pool: &SqlitePool, user_id: UserId) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    user.ok_or(DBError::NotFound.into())
}

/// Accounts are owned by the login service; this only records the row articles point at.
pub async fn create_user(pool: &SqlitePool, username: &str) -> AppResult<UserId> {
    let result = sqlx::query("INSERT INTO users (username) VALUES (?1)")
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
