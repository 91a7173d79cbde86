use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use crate::editor::EditorSession;
use crate::handlers::auth_dtos::{Claims, LoginRequest, LoginResponse};
use crate::AppState;

/// Admin login. The gate is the fixed build-time pair checked inside the
/// editor session; the answer for a mismatch is uniform on purpose and
/// there is no lockout or rate limit (this protects content editing, not
/// sensitive data).
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(login_req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<serde_json::Value>)> {
    let mut session = EditorSession::new();
    if !session.login(&state.store, &login_req.email, &login_req.password) {
        tracing::info!("rejected admin login attempt");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Credenziali errate"})),
        ));
    }

    let session_id = Uuid::new_v4().to_string();
    let claims = Claims {
        sub: session_id.clone(),
        exp: (Utc::now() + Duration::hours(12)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("failed to sign session token: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to create session token"})),
        )
    })?;

    state.editor_sessions.insert(session_id, session);
    tracing::info!("admin editor session opened");

    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn session_token_round_trips_through_hs256() {
        let secret = "test-secret";
        let claims = Claims {
            sub: "abc".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, "abc");
    }
}
