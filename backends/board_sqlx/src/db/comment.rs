use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::AppResult;

use super::{ArticleId, Author, UserId};

pub type CommentId = i64;

#[derive(Debug, Serialize, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub body: String,
    #[sqlx(flatten)]
    pub member: Author,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub is_like: bool,
}

#[derive(Debug)]
pub struct NewComment<'a> {
    pub article_id: ArticleId,
    pub member_id: UserId,
    pub body: &'a str,
}

/// Comments of an article in the order they were posted.
pub async fn list_comments(
    pool: &SqlitePool,
    article_id: ArticleId,
    viewer: UserId,
) -> AppResult<Vec<Comment>> {
    Ok(sqlx::query_as::<_, Comment>(
        r#"
        SELECT
            comments.id,
            comments.article_id,
            comments.body,
            comments.member_id AS author_id,
            users.username AS author_username,
            comments.created_at,
            (
                SELECT COUNT(*)
                FROM comment_likes
                WHERE comment_likes.comment_id = comments.id
            ) AS like_count,
            EXISTS (
                SELECT 1
                FROM comment_likes
                WHERE comment_likes.comment_id = comments.id
                    AND comment_likes.user_id = ?2
            ) AS is_like
        FROM comments
        INNER JOIN users ON users.id = comments.member_id
        WHERE comments.article_id = ?1
        ORDER BY comments.id
        "#,
    )
    .bind(article_id)
    .bind(viewer)
    .fetch_all(pool)
    .await?)
}

pub async fn create_comment(pool: &SqlitePool, comment: NewComment<'_>) -> AppResult<CommentId> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (article_id, member_id, body, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(comment.article_id)
    .bind(comment.member_id)
    .bind(comment.body)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
