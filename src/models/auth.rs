use crate::app_factory::AppState;
use crate::auth::JWT_KEYS;
use axum::response::{IntoResponse, Response};
use axum::{
    extract::FromRequestParts, http::request::Parts, http::StatusCode, Json, RequestPartsExt,
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::errors::ErrorKind::ExpiredSignature;
use jsonwebtoken::{decode, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use utoipa::ToSchema;

/// Staff roles carried in the JWT. Admins may import workbooks; curators maintain
/// universities and review feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Curator,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidToken,
    TokenExpired,
}
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        };
        let body = Json(json!({
            "error": error_message,
        }));
        (status, body).into_response()
    }
}
#[derive(Debug, Serialize, Deserialize)]
pub struct JWTClaims {
    pub sub: String,
    pub exp: usize,
    pub role: Role,
}
impl fmt::Display for JWTClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sub: {}\nExp: {}\nRole: {:?}",
            self.sub, self.exp, self.role
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub expiry: usize,
    pub role: Role,
}

impl fmt::Display for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserId: {}\nExpiry: {}\nRole: {:?}",
            self.user_id, self.expiry, self.role
        )
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;
    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer_token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());

        let token = match bearer_token {
            Some(token) => token,
            None => {
                let cookie_jar = parts
                    .extract::<CookieJar>()
                    .await
                    .map_err(|_| AuthError::InvalidToken)?;
                cookie_jar
                    .get("jwt")
                    .map(|cookie| cookie.value().to_string())
                    .ok_or(AuthError::InvalidToken)?
            }
        };

        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data =
            decode::<JWTClaims>(&token, &JWT_KEYS.decoding, &validation).map_err(|e| {
                match e.kind() {
                    ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        let claims = token_data.claims;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            expiry: claims.exp,
            role: claims.role,
        })
    }
}
