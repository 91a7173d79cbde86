use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::json;

use crate::handlers::auth_dtos::Claims;
use crate::AppState;

/// Extractor for admin routes: validates the bearer token and resolves the
/// editor session id it carries. The session itself must still exist in
/// `AppState`, so tokens outlive a closed session harmlessly.
#[derive(Clone)]
pub struct AuthSession {
    pub session_id: String,
}

#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "));

        let token = auth_header.ok_or(AuthError {
            status: StatusCode::UNAUTHORIZED,
            message: "No authorization token provided".to_string(),
        })?;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AuthError {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid token".to_string(),
        })?
        .claims;

        if !state.editor_sessions.contains_key(&claims.sub) {
            return Err(AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: "Session closed, log in again".to_string(),
            });
        }

        Ok(AuthSession {
            session_id: claims.sub,
        })
    }
}
