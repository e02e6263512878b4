pub mod articles;
pub mod comments;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{
    db::{ArticleId, CategoryId, SortMode},
    error::AppError,
};

/// `axum::extract::Path` whose rejection is rendered as an `AppError`.
pub struct Path<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::from(rejection)),
        }
    }
}

fn article_url(article_id: ArticleId) -> String {
    format!("/articles/{article_id}")
}

fn article_index_url(category_id: CategoryId, sort: Option<SortMode>) -> String {
    match sort {
        Some(sort) => format!(
            "/categories/{category_id}/articles?sort={}",
            sort.query_value()
        ),
        None => format!("/categories/{category_id}/articles"),
    }
}
