use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum DBError {
    #[error("Not Found")]
    NotFound,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("DB Error: {0:?}")]
    DBError(#[from] DBError),

    #[error("Forbidden request: {0}")]
    Forbidden(&'static str),

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("JWT error: {0:?}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DBError(DBError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Sqlx(_) | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Path(rejection) => rejection.status(),
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let error_message = match self {
            AppError::DBError(db_error) => Some(db_error.to_string()),
            AppError::Path(rejection) => Some(rejection.body_text()),
            _ => None,
        };

        let body = Json(json!({
            "error": error_message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string()),
        }));

        (status, body).into_response()
    }
}
