use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppResult, DBError};

use super::{Author, CategoryId, UserId};

pub type ArticleId = i64;

#[derive(Debug, Serialize, FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub body: String,
    #[sqlx(flatten)]
    pub author: Author,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
    pub is_like: bool,
}

/// Just enough of an article to route and authorize a command against it.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ArticleOwner {
    pub id: ArticleId,
    pub author_id: UserId,
    pub category_id: CategoryId,
}

#[derive(Debug)]
pub struct NewArticle<'a> {
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug)]
pub struct ArticleChanges<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Newest,
    Popular,
}

impl SortMode {
    pub const NEWEST: &'static str = "最新";
    pub const POPULAR: &'static str = "熱門";

    /// Anything that is not the popular label falls back to newest.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::POPULAR | "popular" => SortMode::Popular,
            _ => SortMode::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Newest => Self::NEWEST,
            SortMode::Popular => Self::POPULAR,
        }
    }

    /// Percent-encoded label, for use in a `Location` header.
    pub fn query_value(self) -> &'static str {
        match self {
            SortMode::Newest => "%E6%9C%80%E6%96%B0",
            SortMode::Popular => "%E7%86%B1%E9%96%80",
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            SortMode::Newest => "articles.created_at DESC, articles.id DESC",
            SortMode::Popular => "like_count DESC, articles.created_at DESC, articles.id DESC",
        }
    }
}

// ?1 is always the viewer.
const ARTICLE_SELECT: &str = r#"
    SELECT
        articles.id,
        articles.title,
        articles.body,
        articles.author_id,
        users.username AS author_username,
        articles.category_id,
        articles.created_at,
        (
            SELECT COUNT(*)
            FROM article_likes
            WHERE article_likes.article_id = articles.id
        ) AS like_count,
        (
            SELECT COUNT(*)
            FROM comments
            WHERE comments.article_id = articles.id
        ) AS comment_count,
        EXISTS (
            SELECT 1
            FROM article_likes
            WHERE article_likes.article_id = articles.id
                AND article_likes.user_id = ?1
        ) AS is_like
    FROM articles
    INNER JOIN users ON users.id = articles.author_id
"#;

pub async fn list_articles(
    pool: &SqlitePool,
    category_id: CategoryId,
    sort: SortMode,
    viewer: UserId,
) -> AppResult<Vec<Article>> {
    let sql = format!(
        "{ARTICLE_SELECT} WHERE articles.category_id = ?2 ORDER BY {}",
        sort.order_by()
    );

    Ok(sqlx::query_as::<_, Article>(&sql)
        .bind(viewer)
        .bind(category_id)
        .fetch_all(pool)
        .await?)
}

pub async fn retrieve_article(
    pool: &SqlitePool,
    article_id: ArticleId,
    viewer: UserId,
) -> AppResult<Article> {
    let sql = format!("{ARTICLE_SELECT} WHERE articles.id = ?2");

    let article = sqlx::query_as::<_, Article>(&sql)
        .bind(viewer)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;

    article.ok_or(DBError::NotFound.into())
}

pub async fn find_article_owner(
    pool: &SqlitePool,
    article_id: ArticleId,
) -> AppResult<ArticleOwner> {
    let owner = sqlx::query_as::<_, ArticleOwner>(
        "SELECT id, author_id, category_id FROM articles WHERE id = ?1",
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    owner.ok_or(DBError::NotFound.into())
}

pub async fn create_article(pool: &SqlitePool, article: NewArticle<'_>) -> AppResult<ArticleId> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (title, body, author_id, category_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(article.title)
    .bind(article.body)
    .bind(article.author_id)
    .bind(article.category_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Author and category are fixed at creation and never touched here.
pub async fn update_article(
    pool: &SqlitePool,
    article_id: ArticleId,
    changes: ArticleChanges<'_>,
) -> AppResult<()> {
    let result = sqlx::query("UPDATE articles SET title = ?1, body = ?2 WHERE id = ?3")
        .bind(changes.title)
        .bind(changes.body)
        .bind(article_id)
        .execute(pool)
        .await?;

    match result.rows_affected() {
        0 => Err(DBError::NotFound.into()),
        _ => Ok(()),
    }
}

/// Comments and likes go with the article through `ON DELETE CASCADE`.
pub async fn delete_article(pool: &SqlitePool, article_id: ArticleId) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
        .bind(article_id)
        .execute(pool)
        .await?;

    match result.rows_affected() {
        0 => Err(DBError::NotFound.into()),
        _ => Ok(()),
    }
}
