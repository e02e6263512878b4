pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::FromRef;
use jsonwebtoken::DecodingKey;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    decoding_key: DecodingKey,
    login_url: Arc<str>,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: &[u8], login_url: &str) -> Self {
        Self {
            pool,
            decoding_key: DecodingKey::from_secret(jwt_secret),
            login_url: login_url.into(),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for DecodingKey {
    fn from_ref(app_state: &AppState) -> DecodingKey {
        app_state.decoding_key.clone()
    }
}
