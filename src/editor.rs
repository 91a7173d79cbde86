use serde::Deserialize;
use uuid::Uuid;

use crate::models::site_models::{MockupRecord, SiteConfig, DEFAULT_MOCKUPS};
use crate::store::{ContentStore, StoreError};

// The fixed operator credential pair. A deliberately weak gate protecting
// content editing, not sensitive data; no lockout, no hashing.
pub const ADMIN_EMAIL: &str = "info@fareapp.it";
pub const ADMIN_PASSWORD: &str = "123456";

/// Field selector for [`EditorSession::edit_field`]. Wire names match the
/// editable inputs of the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MockupField {
    Name,
    Category,
    Description,
    Image,
    PlayStoreUrl,
    AppStoreUrl,
}

/// One open/close cycle of the admin panel. Holds the staged working copy;
/// the content store is untouched until an explicit [`EditorSession::save`].
pub struct EditorSession {
    working: Option<SiteConfig>,
    login_error: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            working: None,
            login_error: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.working.is_some()
    }

    /// Set when the last login attempt failed. Cleared by a successful one.
    pub fn login_error(&self) -> bool {
        self.login_error
    }

    /// Checks the fixed pair and, on success, loads the working copy from
    /// the store. The failure answer is uniform: callers cannot tell a
    /// wrong email from a wrong password.
    pub fn login(&mut self, store: &ContentStore, email: &str, password: &str) -> bool {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            let mut config = store.read();
            if config.mockups.is_empty() {
                // seed the editor with the stock gallery so there is
                // something to edit on a fresh install
                config.mockups = DEFAULT_MOCKUPS.clone();
            }
            self.working = Some(config);
            self.login_error = false;
            true
        } else {
            self.login_error = true;
            false
        }
    }

    pub fn working(&self) -> Option<&SiteConfig> {
        self.working.as_ref()
    }

    fn working_mut(&mut self) -> Option<&mut SiteConfig> {
        self.working.as_mut()
    }

    /// Appends a placeholder record with a fresh id and returns the id.
    pub fn add_mockup(&mut self) -> Option<String> {
        let working = self.working_mut()?;
        let id = Uuid::new_v4().to_string();
        working.mockups.push(MockupRecord::placeholder(id.clone()));
        Some(id)
    }

    /// Removes the record with the given id from the working copy.
    /// Unknown ids are a no-op. Persists only on save.
    pub fn remove_mockup(&mut self, id: &str) {
        if let Some(working) = self.working_mut() {
            working.mockups.retain(|m| m.id != id);
        }
    }

    /// Replaces one field of the matching record. Value content is not
    /// validated beyond being text. Unknown ids are a no-op.
    pub fn edit_field(&mut self, id: &str, field: MockupField, value: &str) {
        let Some(working) = self.working_mut() else {
            return;
        };
        let Some(record) = working.mockups.iter_mut().find(|m| m.id == id) else {
            return;
        };
        let slot = match field {
            MockupField::Name => &mut record.name,
            MockupField::Category => &mut record.category,
            MockupField::Description => &mut record.description,
            MockupField::Image => &mut record.image_url,
            MockupField::PlayStoreUrl => &mut record.play_store_url,
            MockupField::AppStoreUrl => &mut record.app_store_url,
        };
        *slot = value.to_string();
    }

    pub fn set_chatbot_prompt(&mut self, value: &str) {
        if let Some(working) = self.working_mut() {
            working.chatbot_prompt = value.to_string();
        }
    }

    pub fn set_site_logo_url(&mut self, value: &str) {
        if let Some(working) = self.working_mut() {
            working.site_logo_url = value.to_string();
        }
    }

    pub fn set_global_play_store_url(&mut self, value: &str) {
        if let Some(working) = self.working_mut() {
            working.global_play_store_url = value.to_string();
        }
    }

    pub fn set_global_app_store_url(&mut self, value: &str) {
        if let Some(working) = self.working_mut() {
            working.global_app_store_url = value.to_string();
        }
    }

    /// Commits the whole working copy. The session stays authenticated so
    /// the operator can keep editing; on failure the working copy is kept
    /// for a retry.
    pub fn save(&self, store: &ContentStore) -> Result<(), StoreError> {
        match &self.working {
            Some(config) => store.write(config),
            None => Ok(()),
        }
    }

    /// Discards the working copy without writing.
    pub fn close(&mut self) {
        self.working = None;
        self.login_error = false;
    }

    /// Wipes the store back to defaults and ends the session.
    pub fn clear_all(&mut self, store: &ContentStore) -> Result<(), StoreError> {
        if self.working.is_none() {
            return Ok(());
        }
        store.clear()?;
        self.close();
        Ok(())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use std::collections::HashSet;

    fn store() -> ContentStore {
        ContentStore::new(Box::new(MemoryBackend::new()))
    }

    fn logged_in(store: &ContentStore) -> EditorSession {
        let mut session = EditorSession::new();
        assert!(session.login(store, ADMIN_EMAIL, ADMIN_PASSWORD));
        session
    }

    #[test]
    fn wrong_credentials_stay_unauthenticated_with_error_flag() {
        let store = store();
        let mut session = EditorSession::new();
        assert!(!session.login(&store, "wrong@x.com", "bad"));
        assert!(!session.is_authenticated());
        assert!(session.login_error());

        assert!(session.login(&store, ADMIN_EMAIL, ADMIN_PASSWORD));
        assert!(session.is_authenticated());
        assert!(!session.login_error());
    }

    #[test]
    fn ids_stay_unique_across_add_and_remove() {
        let store = store();
        let mut session = logged_in(&store);

        let a = session.add_mockup().unwrap();
        let _b = session.add_mockup().unwrap();
        session.remove_mockup(&a);
        let _c = session.add_mockup().unwrap();
        let _d = session.add_mockup().unwrap();

        let ids: Vec<&str> = session
            .working()
            .unwrap()
            .mockups
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn close_without_save_discards_edits() {
        let store = store();
        let session = logged_in(&store);
        session.save(&store).unwrap();

        let id = store.read().mockups[0].id.clone();
        let original_name = store.read().mockups[0].name.clone();

        let mut session2 = EditorSession::new();
        session2.login(&store, ADMIN_EMAIL, ADMIN_PASSWORD);
        session2.edit_field(&id, MockupField::Name, "X");
        session2.close();

        assert_eq!(store.read().mockups[0].name, original_name);
        assert!(!session2.is_authenticated());
    }

    #[test]
    fn save_persists_staged_edits() {
        let store = store();
        let mut session = logged_in(&store);
        let id = session.working().unwrap().mockups[0].id.clone();
        session.edit_field(&id, MockupField::Name, "Pizzeria Verace");
        session.edit_field(&id, MockupField::PlayStoreUrl, "https://play/x");
        session.save(&store).unwrap();

        let persisted = store.read();
        assert_eq!(persisted.mockups[0].name, "Pizzeria Verace");
        assert_eq!(persisted.mockups[0].play_store_url, "https://play/x");
        // session continues after save
        assert!(session.is_authenticated());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let store = store();
        let mut session = logged_in(&store);
        let before = session.working().unwrap().mockups.len();
        session.remove_mockup("no-such-id");
        assert_eq!(session.working().unwrap().mockups.len(), before);
    }

    #[test]
    fn clear_all_resets_store_and_ends_session() {
        let store = store();
        let mut session = logged_in(&store);
        session.set_site_logo_url("https://x/logo.png");
        session.save(&store).unwrap();
        assert!(!store.read().site_logo_url.is_empty());

        session.clear_all(&store).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.read(), SiteConfig::default());
    }

    #[test]
    fn scalar_setters_touch_only_working_copy() {
        let store = store();
        let mut session = logged_in(&store);
        session.set_chatbot_prompt("Nuovo prompt");
        session.set_global_app_store_url("https://apps.apple.com/y");
        assert_ne!(store.read().chatbot_prompt, "Nuovo prompt");
        session.save(&store).unwrap();
        assert_eq!(store.read().chatbot_prompt, "Nuovo prompt");
        assert_eq!(store.read().global_app_store_url, "https://apps.apple.com/y");
    }
}
