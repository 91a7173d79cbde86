pub mod backend;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::models::site_models::{
    SiteConfig, ALL_KEYS, KEY_APP_STORE_URL, KEY_CHATBOT_PROMPT, KEY_MOCKUPS, KEY_PLAY_STORE_URL,
    KEY_SITE_LOGO,
};
pub use backend::{FileBackend, MemoryBackend, StorageBackend, StoreError};

/// Durable key-value holder for the operator-editable site content, plus a
/// payload-less change broadcast. Single writer (the admin save/clear
/// actions), many readers; subscribers call [`ContentStore::read`] again
/// when notified.
pub struct ContentStore {
    backend: Box<dyn StorageBackend>,
    changes: broadcast::Sender<()>,
}

impl ContentStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self { backend, changes }
    }

    /// Reads the full configuration. Absent keys materialize as defaults;
    /// this never fails, so first read on an empty store just yields the
    /// built-in values.
    pub fn read(&self) -> SiteConfig {
        let defaults = SiteConfig::default();

        let mockups = match self.backend.get(KEY_MOCKUPS) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!("ignoring malformed mockup data in store: {}", e);
                    defaults.mockups.clone()
                }
            },
            None => defaults.mockups.clone(),
        };

        let scalar = |key: &str, fallback: &str| -> String {
            match self.backend.get(key) {
                Some(v) if !v.is_empty() => v,
                _ => fallback.to_string(),
            }
        };

        SiteConfig {
            chatbot_prompt: scalar(KEY_CHATBOT_PROMPT, &defaults.chatbot_prompt),
            site_logo_url: scalar(KEY_SITE_LOGO, &defaults.site_logo_url),
            global_play_store_url: scalar(KEY_PLAY_STORE_URL, &defaults.global_play_store_url),
            global_app_store_url: scalar(KEY_APP_STORE_URL, &defaults.global_app_store_url),
            mockups,
        }
    }

    /// Full overwrite of every key, then one change notification. There is
    /// no merge and no concurrency check: the last writer wins.
    pub fn write(&self, config: &SiteConfig) -> Result<(), StoreError> {
        let mockups_json =
            serde_json::to_string(&config.mockups).map_err(|source| StoreError::Serialize {
                key: KEY_MOCKUPS.to_string(),
                source,
            })?;

        self.backend.set(KEY_MOCKUPS, &mockups_json)?;
        self.backend.set(KEY_CHATBOT_PROMPT, &config.chatbot_prompt)?;
        self.backend.set(KEY_SITE_LOGO, &config.site_logo_url)?;
        self.backend
            .set(KEY_PLAY_STORE_URL, &config.global_play_store_url)?;
        self.backend
            .set(KEY_APP_STORE_URL, &config.global_app_store_url)?;

        self.notify();
        Ok(())
    }

    /// Removes every persisted key so the next read returns pure defaults.
    /// Idempotent. Fires the change notification so consumers refresh.
    pub fn clear(&self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.backend.remove(key)?;
        }
        self.notify();
        Ok(())
    }

    /// Subscribe to the change broadcast. The event carries no payload;
    /// call [`ContentStore::read`] to get the fresh value.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        // send only fails when nobody is subscribed
        if self.changes.send(()).is_err() {
            debug!("content changed with no subscribers");
        }
    }
}
