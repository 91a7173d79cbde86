use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::site_models::{ChatMessage, ChatRole};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

// Visitor-facing fallback copy. Raw errors never reach the chat widget.
pub const FALLBACK_OFFLINE: &str =
    "Il consulente virtuale è momentaneamente offline. Scrivici a info@fareapp.it e ti risponderemo al più presto.";
pub const FALLBACK_BUSY: &str =
    "Attualmente i nostri sistemi sono molto trafficati. Per favore, riprova tra qualche istante o contattaci via email.";
pub const FALLBACK_EMPTY: &str =
    "Scusa, ho avuto un piccolo problema di connessione. Puoi ripetere la domanda?";

/// Diagnostic view of the configured credential. Never exposes the value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KeyStatus {
    pub present: bool,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTest {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the hosted generative-language endpoint. The credential is
/// injected once at startup; nothing here re-probes the environment.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            client,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn key_status(&self) -> KeyStatus {
        KeyStatus {
            present: self.api_key.is_some(),
            length: self.api_key.as_ref().map(|k| k.len()).unwrap_or(0),
        }
    }

    /// One lightweight round trip, with operator-readable diagnostics that
    /// tell apart a missing key, a rejected key, an unavailable model and
    /// plain network trouble.
    pub async fn test_connection(&self) -> ConnectionTest {
        if self.api_key.is_none() {
            return ConnectionTest {
                success: false,
                message: "Chiave API non configurata nel sistema.".to_string(),
            };
        }

        match self.generate(None, &[], "Ping").await {
            Ok(text) if !text.is_empty() => ConnectionTest {
                success: true,
                message: "Connessione IA stabilita con successo!".to_string(),
            },
            Ok(_) => ConnectionTest {
                success: false,
                message: "Risposta vuota dal server.".to_string(),
            },
            Err(e) => ConnectionTest {
                success: false,
                message: e.operator_message(),
            },
        }
    }

    /// Sends the system prompt plus the turn history and the new message;
    /// returns the model's text, or a friendly fallback on any failure.
    /// Callers pass the prompt read from the content store at send time.
    pub async fn chat(&self, system_prompt: &str, history: &[ChatMessage], message: &str) -> String {
        if self.api_key.is_none() {
            info!("chat requested with no API key configured, serving offline fallback");
            return FALLBACK_OFFLINE.to_string();
        }

        match self.generate(Some(system_prompt), history, message).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => FALLBACK_EMPTY.to_string(),
            Err(e) => {
                error!("gemini chat call failed: {}", e.operator_message());
                FALLBACK_BUSY.to_string()
            }
        }
    }

    async fn generate(
        &self,
        system_prompt: Option<&str>,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingKey)?;

        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content {
                role: Some(
                    match m.role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: m.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let body = GenerateRequest {
            system_instruction: system_prompt.map(|p| Content {
                role: None,
                parts: vec![Part { text: p.to_string() }],
            }),
            contents,
            generation_config: GenerationConfig { temperature: 0.7 },
        };

        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 | 401 | 403 => GeminiError::BadCredential(detail),
                404 => GeminiError::ModelUnavailable(self.model.clone()),
                _ => GeminiError::Api(status.as_u16(), detail),
            });
        }

        let parsed: GenerateResponse = res
            .json()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        Ok(parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default())
    }
}

#[derive(Debug)]
enum GeminiError {
    MissingKey,
    BadCredential(String),
    ModelUnavailable(String),
    Api(u16, String),
    Network(String),
}

impl GeminiError {
    fn operator_message(&self) -> String {
        match self {
            GeminiError::MissingKey => "Chiave API non configurata nel sistema.".to_string(),
            GeminiError::BadCredential(_) => {
                "Chiave API rifiutata dal servizio. Verifica la credenziale configurata.".to_string()
            }
            GeminiError::ModelUnavailable(model) => {
                format!("Modello '{}' non disponibile.", model)
            }
            GeminiError::Api(status, _) => {
                format!("Errore del servizio IA (HTTP {}).", status)
            }
            GeminiError::Network(detail) => {
                format!("Errore di rete verso il servizio IA: {}", detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reports_absent_status() {
        let client = GeminiClient::new(None);
        let status = client.key_status();
        assert!(!status.present);
        assert_eq!(status.length, 0);

        let client = GeminiClient::new(Some("   ".to_string()));
        assert!(!client.key_status().present);
    }

    #[test]
    fn present_key_reports_length_not_value() {
        let client = GeminiClient::new(Some("abc123".to_string()));
        let status = client.key_status();
        assert!(status.present);
        assert_eq!(status.length, 6);
        let rendered = serde_json::to_string(&status).unwrap();
        assert!(!rendered.contains("abc123"));
    }

    #[tokio::test]
    async fn chat_without_key_returns_offline_fallback() {
        let client = GeminiClient::new(None);
        let reply = client.chat("prompt", &[], "Ciao").await;
        assert_eq!(reply, FALLBACK_OFFLINE);
    }

    #[tokio::test]
    async fn test_connection_without_key_names_the_configuration_problem() {
        let client = GeminiClient::new(None);
        let result = client.test_connection().await;
        assert!(!result.success);
        assert_eq!(result.message, "Chiave API non configurata nel sistema.");
    }
}
