use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    db::{
        self, find_article_owner, toggle_comment_like, ArticleId, CommentId, LikeDirection,
        NewComment,
    },
    error::AppResult,
};

use super::{article_url, Path};

#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "comment must be 1 to 1000 characters"))]
    pub body: String,
}

// POST /articles/:id
pub async fn create_comment(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    let article = find_article_owner(&pool, article_id).await?;

    let form = CommentForm {
        body: form.body.trim().to_string(),
    };

    // Invalid comments are dropped; either way the reader lands back on the article.
    match form.validate() {
        Ok(()) => {
            let comment_id = db::create_comment(
                &pool,
                NewComment {
                    article_id: article.id,
                    member_id: user.id,
                    body: &form.body,
                },
            )
            .await?;
            tracing::info!(comment_id, article_id, member_id = user.id, "comment posted");
        }
        Err(errors) => tracing::debug!(article_id, %errors, "invalid comment form"),
    }

    Ok(Redirect::to(&article_url(article.id)))
}

// POST /comments/:id/like
pub async fn like_comment(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(comment_id): Path<CommentId>,
) -> AppResult<impl IntoResponse> {
    let state = toggle_comment_like(&pool, user.id, comment_id, LikeDirection::Add).await?;
    Ok(Json(json!({ "comment": state })))
}

// POST /comments/:id/unlike
pub async fn unlike_comment(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(comment_id): Path<CommentId>,
) -> AppResult<impl IntoResponse> {
    let state = toggle_comment_like(&pool, user.id, comment_id, LikeDirection::Remove).await?;
    Ok(Json(json!({ "comment": state })))
}
