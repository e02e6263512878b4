use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{api, AppState};

pub fn generate_routes(state: AppState) -> Router {
    Router::new()
        // ==== ARTICLES ==== //
        .route(
            "/categories/:category_id/articles",
            get(api::articles::get_articles).post(api::articles::create_article),
        )
        .route(
            "/categories/:category_id/articles/new",
            get(api::articles::new_article),
        )
        .route(
            "/articles/:id",
            get(api::articles::get_article)
                .post(api::comments::create_comment) // post comment
                .delete(api::articles::delete_article),
        )
        .route(
            "/articles/:id/edit",
            get(api::articles::edit_article)
                .put(api::articles::update_article)
                .post(api::articles::update_article), // HTML forms cannot PUT
        )
        .route("/articles/:id/delete", post(api::articles::delete_article))
        // ==== LIKES ==== //
        .route("/articles/:id/like", post(api::articles::like_article))
        .route("/articles/:id/unlike", post(api::articles::unlike_article))
        .route("/comments/:id/like", post(api::comments::like_comment))
        .route("/comments/:id/unlike", post(api::comments::unlike_comment))
        .fallback(handler_404)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
