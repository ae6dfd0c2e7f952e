use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by the identity provider's session token. Only the
/// subject matters here; the provider handles credentials and sessions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The verified identity attached to a request: an opaque user id resolved
/// from the `Authorization: Bearer` token. Handlers that take this
/// extractor are authenticated; a missing or invalid token is a 401 before
/// any handler logic runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let key = DecodingKey::from_secret(state.config().jwt_secret.as_bytes());
        let data = decode::<Claims>(token, &key, &Validation::default()).map_err(|err| {
            tracing::debug!("rejected bearer token: {err}");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser(data.claims.sub))
    }
}

/// Mint a short-lived token for handler tests.
#[cfg(test)]
pub fn mint_token(sub: &str, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode test token")
}
