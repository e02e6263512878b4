#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use board::{
    auth::generate_jwt,
    db::{self, CategoryId, UserId},
    routes::generate_routes,
    AppState,
};
use jsonwebtoken::EncodingKey;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-secret";
pub const LOGIN_URL: &str = "/accounts/login";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub alice: UserId,
    pub bob: UserId,
    pub category: CategoryId,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::prepare_db(&pool).await.unwrap();

        let alice = db::create_user(&pool, "alice").await.unwrap();
        let bob = db::create_user(&pool, "bob").await.unwrap();
        let category = db::create_category(&pool, "general").await.unwrap();

        let router = generate_routes(AppState::new(pool.clone(), SECRET, LOGIN_URL));

        Self {
            router,
            pool,
            alice,
            bob,
            category,
        }
    }

    pub fn token(&self, user_id: UserId) -> String {
        generate_jwt(user_id, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, user_id: UserId, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Token {}", self.token(user_id)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn submit(
        &self,
        user_id: UserId,
        method: Method,
        uri: &str,
        form: &str,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Token {}", self.token(user_id)))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, user_id: UserId, uri: &str, form: &str) -> Response<Body> {
        self.submit(user_id, Method::POST, uri, form).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn location(response: &Response<Body>) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

pub async fn json(response: Response<Body>) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
