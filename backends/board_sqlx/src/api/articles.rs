use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use validator::{Validate, ValidationErrors};

use crate::{
    auth::{authorize_author, CurrentUser},
    db::{
        self, find_article_owner, find_category, list_articles, list_categories, list_comments,
        retrieve_article, toggle_article_like, ArticleChanges, ArticleId, CategoryId,
        LikeDirection, NewArticle, SortMode,
    },
    error::AppResult,
};

use super::{article_index_url, article_url, Path};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ArticleForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "body can't be blank"))]
    pub body: String,
}

impl ArticleForm {
    fn cleaned(self) -> Result<Self, ValidationErrors> {
        let form = Self {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
        };
        form.validate()?;
        Ok(form)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default)]
    sort: Option<String>,
}

// GET /categories/:category_id/articles
pub async fn get_articles(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(category_id): Path<CategoryId>,
    Query(params): Query<ListArticlesQuery>,
) -> AppResult<impl IntoResponse> {
    let category = find_category(&pool, category_id).await?;
    let sort = params.sort.unwrap_or_else(|| SortMode::NEWEST.to_string());

    let articles = list_articles(&pool, category.id, SortMode::parse(&sort), user.id).await?;
    let category_list = list_categories(&pool).await?;

    Ok(Json(json!({
        "category": category,
        "category_list": category_list,
        "sort": sort,
        "articles": articles,
    })))
}

// GET /categories/:category_id/articles/new
pub async fn new_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(category_id): Path<CategoryId>,
) -> AppResult<impl IntoResponse> {
    let category = find_category(&pool, category_id).await?;
    let category_list = list_categories(&pool).await?;

    Ok(Json(json!({
        "category": category,
        "category_list": category_list,
        "author": { "id": user.id, "username": user.username },
    })))
}

// POST /categories/:category_id/articles
pub async fn create_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(category_id): Path<CategoryId>,
    Form(form): Form<ArticleForm>,
) -> AppResult<Redirect> {
    let category = find_category(&pool, category_id).await?;

    let form = match form.cleaned() {
        Ok(form) => form,
        Err(errors) => {
            tracing::debug!(category_id, %errors, "invalid article form");
            return Ok(Redirect::to(&format!(
                "/categories/{}/articles/new",
                category.id
            )));
        }
    };

    let article_id = db::create_article(
        &pool,
        NewArticle {
            author_id: user.id,
            category_id: category.id,
            title: &form.title,
            body: &form.body,
        },
    )
    .await?;
    tracing::info!(article_id, category_id, author_id = user.id, "article created");

    Ok(Redirect::to(&article_index_url(
        category.id,
        Some(SortMode::Newest),
    )))
}

// GET /articles/:id
pub async fn get_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
) -> AppResult<impl IntoResponse> {
    let article = retrieve_article(&pool, article_id, user.id).await?;
    let comments = list_comments(&pool, article.id, user.id).await?;
    let category_list = list_categories(&pool).await?;

    Ok(Json(json!({
        "article": article,
        "comments": comments,
        "category_list": category_list,
    })))
}

// GET /articles/:id/edit
pub async fn edit_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
) -> AppResult<impl IntoResponse> {
    let owner = find_article_owner(&pool, article_id).await?;
    authorize_author(&user, owner.author_id)?;

    let article = retrieve_article(&pool, owner.id, user.id).await?;
    let form = ArticleForm {
        title: article.title.clone(),
        body: article.body.clone(),
    };

    Ok(Json(json!({ "article": article, "form": form })))
}

// PUT /articles/:id/edit
pub async fn update_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
    Form(form): Form<ArticleForm>,
) -> AppResult<Redirect> {
    let owner = find_article_owner(&pool, article_id).await?;
    authorize_author(&user, owner.author_id)?;

    let form = match form.cleaned() {
        Ok(form) => form,
        Err(errors) => {
            tracing::debug!(article_id, %errors, "invalid article form");
            return Ok(Redirect::to(&format!("/articles/{}/edit", owner.id)));
        }
    };

    db::update_article(
        &pool,
        owner.id,
        ArticleChanges {
            title: &form.title,
            body: &form.body,
        },
    )
    .await?;
    tracing::info!(article_id, "article updated");

    Ok(Redirect::to(&article_url(owner.id)))
}

// DELETE /articles/:id
pub async fn delete_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
) -> AppResult<Redirect> {
    let owner = find_article_owner(&pool, article_id).await?;
    authorize_author(&user, owner.author_id)?;

    db::delete_article(&pool, owner.id).await?;
    tracing::info!(article_id, category_id = owner.category_id, "article deleted");

    Ok(Redirect::to(&article_index_url(owner.category_id, None)))
}

// POST /articles/:id/like
pub async fn like_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
) -> AppResult<impl IntoResponse> {
    let state = toggle_article_like(&pool, user.id, article_id, LikeDirection::Add).await?;
    Ok(Json(json!({ "article": state })))
}

// POST /articles/:id/unlike
pub async fn unlike_article(
    State(pool): State<SqlitePool>,
    user: CurrentUser,
    Path(article_id): Path<ArticleId>,
) -> AppResult<impl IntoResponse> {
    let state = toggle_article_like(&pool, user.id, article_id, LikeDirection::Remove).await?;
    Ok(Json(json!({ "article": state })))
}
