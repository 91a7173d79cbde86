use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::gemini::{ConnectionTest, KeyStatus};
use crate::editor::MockupField;
use crate::handlers::auth_middleware::AuthSession;
use crate::models::site_models::SiteConfig;
use crate::AppState;

type ApiError = (StatusCode, Json<serde_json::Value>);

#[derive(Deserialize)]
pub struct EditFieldRequest {
    pub field: MockupField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct RemoveQuery {
    #[serde(default)]
    pub confirmed: bool,
}

/// Scalar settings of the working copy; only the fields present in the
/// request are touched.
#[derive(Deserialize)]
pub struct SettingsRequest {
    pub chatbot_prompt: Option<String>,
    pub site_logo_url: Option<String>,
    pub global_play_store_url: Option<String>,
    pub global_app_store_url: Option<String>,
}

fn session_gone() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Session closed, log in again"})),
    )
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<SiteConfig>, ApiError> {
    let session = state
        .editor_sessions
        .get(&auth.session_id)
        .ok_or_else(session_gone)?;
    let working = session.working().cloned().ok_or_else(session_gone)?;
    Ok(Json(working))
}

pub async fn add_mockup(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut session = state
        .editor_sessions
        .get_mut(&auth.session_id)
        .ok_or_else(session_gone)?;
    let id = session.add_mockup().ok_or_else(session_gone)?;
    Ok(Json(json!({ "id": id })))
}

/// Stages the removal of one record. The client must send `confirmed=true`
/// after its own confirmation prompt; the removal still only persists on
/// save.
pub async fn remove_mockup(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    Path(id): Path<String>,
    Query(query): Query<RemoveQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !query.confirmed {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Removal requires confirmation"})),
        ));
    }
    let mut session = state
        .editor_sessions
        .get_mut(&auth.session_id)
        .ok_or_else(session_gone)?;
    session.remove_mockup(&id);
    Ok(Json(json!({"message": "Mockup removed from working copy"})))
}

pub async fn edit_mockup_field(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    Path(id): Path<String>,
    Json(req): Json<EditFieldRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut session = state
        .editor_sessions
        .get_mut(&auth.session_id)
        .ok_or_else(session_gone)?;
    session.edit_field(&id, req.field, &req.value);
    Ok(Json(json!({"message": "Field updated in working copy"})))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut session = state
        .editor_sessions
        .get_mut(&auth.session_id)
        .ok_or_else(session_gone)?;
    if let Some(prompt) = &req.chatbot_prompt {
        session.set_chatbot_prompt(prompt);
    }
    if let Some(logo) = &req.site_logo_url {
        session.set_site_logo_url(logo);
    }
    if let Some(url) = &req.global_play_store_url {
        session.set_global_play_store_url(url);
    }
    if let Some(url) = &req.global_app_store_url {
        session.set_global_app_store_url(url);
    }
    Ok(Json(json!({"message": "Settings updated in working copy"})))
}

/// Commits the working copy. On a storage failure the working copy is kept
/// so the operator can retry or trim the payload.
pub async fn save(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state
        .editor_sessions
        .get(&auth.session_id)
        .ok_or_else(session_gone)?;
    session.save(&state.store).map_err(|e| {
        tracing::error!("content save failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": format!("Salvataggio non riuscito: {}. Le modifiche non salvate sono state conservate.", e)
            })),
        )
    })?;
    tracing::info!("site content saved");
    Ok(Json(json!({"message": "Modifiche salvate"})))
}

/// Ends the session, discarding any unsaved edits.
pub async fn close(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.editor_sessions.remove(&auth.session_id);
    Ok(Json(json!({"message": "Session closed"})))
}

/// Wipes all persisted content back to defaults and ends the session.
pub async fn clear_all(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    {
        let mut session = state
            .editor_sessions
            .get_mut(&auth.session_id)
            .ok_or_else(session_gone)?;
        session.clear_all(&state.store).map_err(|e| {
            tracing::error!("content clear failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Reset non riuscito: {}", e)})),
            )
        })?;
    }
    state.editor_sessions.remove(&auth.session_id);
    tracing::info!("site content cleared to defaults");
    Ok(Json(json!({"message": "Contenuti riportati ai valori predefiniti"})))
}

pub async fn key_status(
    State(state): State<Arc<AppState>>,
    _auth: AuthSession,
) -> Json<KeyStatus> {
    Json(state.gemini.key_status())
}

pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    _auth: AuthSession,
) -> Json<ConnectionTest> {
    Json(state.gemini.test_connection().await)
}
