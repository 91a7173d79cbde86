use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage write failed for key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage remove failed for key '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw key-value persistence under the content store. Implementations are
/// injected so the store can run against a fake in tests.
pub trait StorageBackend: Send + Sync {
    /// Absent keys are not an error.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One file per key under a data directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("fareapp-store-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn file_backend_round_trips_and_removes() {
        let dir = scratch_dir();
        let backend = FileBackend::new(&dir);
        assert!(backend.get("fareapp_site_logo").is_none());

        backend.set("fareapp_site_logo", "https://x/logo.png").unwrap();
        assert_eq!(
            backend.get("fareapp_site_logo").as_deref(),
            Some("https://x/logo.png")
        );

        backend.remove("fareapp_site_logo").unwrap();
        assert!(backend.get("fareapp_site_logo").is_none());
        // absent key again
        backend.remove("fareapp_site_logo").unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn memory_backend_overwrites_last_writer_wins() {
        let backend = MemoryBackend::new();
        backend.set("k", "first").unwrap();
        backend.set("k", "second").unwrap();
        assert_eq!(backend.get("k").as_deref(), Some("second"));
    }
}
