use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Credentials, Authorization},
    TypedHeader,
};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    db::{get_user, UserId},
    error::{AppError, AppResult},
    AppState,
};

/// Cookie consulted when the request carries no `Authorization` header.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    exp: i64,
    pub user_id: UserId,
}

pub fn verify_token(token: &str, key: &DecodingKey) -> AppResult<UserId> {
    let claims =
        jsonwebtoken::decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims.user_id)
}

/// Tokens are issued by the login service; this is the same encoding it uses.
pub fn generate_jwt(user_id: UserId, key: &EncodingKey) -> AppResult<String> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(30)).timestamp();
    let claims = Claims { user_id, exp };
    let token = encode(&Header::new(Algorithm::HS256), &claims, key)?;

    Ok(token)
}

#[derive(Debug)]
pub struct JWTToken(pub String);

impl Credentials for JWTToken {
    const SCHEME: &'static str = "Token";

    fn decode(value: &HeaderValue) -> Option<Self> {
        let mut it = value.to_str().ok()?.split_whitespace();
        let scheme = it.next()?;
        let token = it.next()?;

        if scheme != Self::SCHEME || it.next().is_some() {
            None?
        }

        Some(Self(token.to_string()))
    }

    fn encode(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("{} {}", Self::SCHEME, self.0))
            .unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// The authenticated actor of a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

/// Rejection for requests without a usable token: send the browser to log in.
#[derive(Debug)]
pub struct LoginRedirect {
    login_url: Arc<str>,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.login_url).into_response()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let reject = || LoginRedirect {
            login_url: state.login_url.clone(),
        };

        let header = TypedHeader::<Authorization<JWTToken>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(token))| token.0);
        let token = match header {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                let Some(cookie) = jar.get(TOKEN_COOKIE) else {
                    tracing::debug!(uri = %parts.uri, "no credentials, redirecting to login");
                    return Err(reject());
                };
                cookie.value().to_string()
            }
        };

        let user_id = verify_token(&token, &state.decoding_key).map_err(|err| {
            tracing::debug!(error = %err, "rejected token");
            reject()
        })?;

        match get_user(&state.pool, user_id).await {
            Ok(user) => Ok(CurrentUser {
                id: user.id,
                username: user.username,
            }),
            Err(err) => {
                tracing::warn!(user_id, error = %err, "token for unknown user");
                Err(reject())
            }
        }
    }
}

/// Only the author of an article may change or remove it.
pub fn authorize_author(actor: &CurrentUser, author_id: UserId) -> AppResult<()> {
    if actor.id != author_id {
        tracing::info!(actor = actor.id, author_id, "refused non-author modification");
        return Err(AppError::Forbidden("only the author may modify this article"));
    }
    Ok(())
}
