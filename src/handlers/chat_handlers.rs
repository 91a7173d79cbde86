use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::site_models::ChatMessage;
use crate::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Visitor chat. The system prompt is read from the content store at send
/// time so a saved prompt edit applies to the very next message. The
/// client never sees an error: every failure mode maps to a friendly
/// fallback inside the Gemini client.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let prompt = state.store.read().chatbot_prompt;
    let reply = state.gemini.chat(&prompt, &req.history, &req.message).await;
    Json(ChatResponse { reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::site_models::ChatRole;

    #[test]
    fn chat_request_accepts_missing_history() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"Ciao"}"#).unwrap();
        assert!(req.history.is_empty());
        assert_eq!(req.message, "Ciao");
    }

    #[test]
    fn chat_request_parses_turn_roles() {
        let raw = r#"{"history":[{"role":"user","text":"A"},{"role":"model","text":"B"}],"message":"C"}"#;
        let req: ChatRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[0].role, ChatRole::User);
        assert_eq!(req.history[1].role, ChatRole::Model);
    }
}
