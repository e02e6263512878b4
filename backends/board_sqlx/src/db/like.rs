use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{AppResult, DBError};

use super::{ArticleId, CommentId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeDirection {
    Add,
    Remove,
}

/// State of a like button after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub id: i64,
    pub like_count: i64,
    pub is_like: bool,
}

struct LikeTable {
    table: &'static str,
    target_column: &'static str,
    target_table: &'static str,
}

const ARTICLE_LIKES: LikeTable = LikeTable {
    table: "article_likes",
    target_column: "article_id",
    target_table: "articles",
};

const COMMENT_LIKES: LikeTable = LikeTable {
    table: "comment_likes",
    target_column: "comment_id",
    target_table: "comments",
};

pub async fn toggle_article_like(
    pool: &SqlitePool,
    user_id: UserId,
    article_id: ArticleId,
    direction: LikeDirection,
) -> AppResult<LikeState> {
    toggle(pool, &ARTICLE_LIKES, user_id, article_id, direction).await
}

pub async fn toggle_comment_like(
    pool: &SqlitePool,
    user_id: UserId,
    comment_id: CommentId,
    direction: LikeDirection,
) -> AppResult<LikeState> {
    toggle(pool, &COMMENT_LIKES, user_id, comment_id, direction).await
}

// The write and the recount share a transaction so the returned count includes this toggle.
// The write must come first: two deferred transactions that both read before writing
// fail with SQLITE_BUSY instead of waiting on the lock.
async fn toggle(
    pool: &SqlitePool,
    likes: &LikeTable,
    user_id: UserId,
    target_id: i64,
    direction: LikeDirection,
) -> AppResult<LikeState> {
    let mut tx = pool.begin().await?;

    // Selecting from the target table turns a missing target into a no-op instead of an FK error.
    let write_sql = match direction {
        LikeDirection::Add => format!(
            "INSERT INTO {} (user_id, {}) SELECT ?1, id FROM {} WHERE id = ?2 \
             ON CONFLICT DO NOTHING",
            likes.table, likes.target_column, likes.target_table
        ),
        LikeDirection::Remove => format!(
            "DELETE FROM {} WHERE user_id = ?1 AND {} = ?2",
            likes.table, likes.target_column
        ),
    };
    sqlx::query(&write_sql)
        .bind(user_id)
        .bind(target_id)
        .execute(&mut *tx)
        .await?;

    let exists_sql = format!("SELECT id FROM {} WHERE id = ?1", likes.target_table);
    let target: Option<i64> = sqlx::query_scalar(&exists_sql)
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await?;
    if target.is_none() {
        return Err(DBError::NotFound.into());
    }

    let count_sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?1",
        likes.table, likes.target_column
    );
    let like_count: i64 = sqlx::query_scalar(&count_sql)
        .bind(target_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        table = likes.table,
        target_id,
        user_id,
        ?direction,
        like_count,
        "like toggled"
    );

    Ok(LikeState {
        id: target_id,
        like_count,
        is_like: direction == LikeDirection::Add,
    })
}
