//! Client-local persistence and the owned stores built on top of it.
//!
//! `LocalStorage` is a best-effort JSON key/value store: reads that fail for
//! any reason fall back to defaults, writes that fail are logged and the
//! in-memory state stays authoritative for the rest of the session.
//!
//! `ResumeStore` and `StyleStore` own the two persistent records. All
//! mutation goes through whole-record replacement, so every consumer reads a
//! consistent snapshot and subscribers observe each replacement exactly once.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ResumeRecord, StylePreferences};

pub const RESUME_KEY: &str = "resumeData";
pub const STYLES_KEY: &str = "resumeStyles";

/// JSON-file key/value storage rooted at a data directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: PathBuf) -> Self {
        LocalStorage { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Reads and parses a stored value. Any failure — missing file, bad
    /// permissions, corrupt JSON — yields `None` without surfacing an error.
    pub fn read(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(key, error = %e, "no persisted value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "persisted value is corrupt, falling back to defaults");
                None
            }
        }
    }

    /// Persists a value. Failures are logged only.
    pub fn write(&self, key: &str, value: &Value) {
        if let Err(e) = fs::create_dir_all(&self.root) {
            warn!(key, error = %e, "could not create storage directory");
            return;
        }
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "could not serialize value");
                return;
            }
        };
        if let Err(e) = fs::write(self.path_for(key), raw) {
            warn!(key, error = %e, "could not persist value");
        }
    }

    /// Removes a stored value. Failures are logged only.
    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(key, error = %e, "could not remove persisted value");
            }
        }
    }
}

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Owns the resume record for the session: snapshot reads, whole-record
/// replacement, persistence on every replacement, subscriber notification.
pub struct ResumeStore {
    record: RwLock<ResumeRecord>,
    storage: LocalStorage,
    subscribers: Mutex<Vec<Subscriber<ResumeRecord>>>,
}

impl ResumeStore {
    /// Loads the persisted record, or the empty record if none is usable.
    pub fn load(storage: LocalStorage) -> Self {
        let record = storage
            .read(RESUME_KEY)
            .map(ResumeRecord::from_storage_value)
            .unwrap_or_default();
        ResumeStore {
            record: RwLock::new(record),
            storage,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> ResumeRecord {
        self.record.read().expect("resume store poisoned").clone()
    }

    /// Replaces the whole record, persists it, and notifies subscribers.
    pub fn replace(&self, next: ResumeRecord) {
        {
            let mut guard = self.record.write().expect("resume store poisoned");
            *guard = next.clone();
        }
        if let Ok(value) = serde_json::to_value(&next) {
            self.storage.write(RESUME_KEY, &value);
        }
        self.notify(&next);
    }

    pub fn subscribe(&self, f: impl Fn(&ResumeRecord) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .push(Box::new(f));
    }

    fn notify(&self, record: &ResumeRecord) {
        for subscriber in self.subscribers.lock().expect("subscriber list poisoned").iter() {
            subscriber(record);
        }
    }
}

/// Owns the style preferences. Same contract as `ResumeStore`, plus
/// reset-to-defaults, which also clears the persisted copy.
pub struct StyleStore {
    styles: RwLock<StylePreferences>,
    storage: LocalStorage,
    subscribers: Mutex<Vec<Subscriber<StylePreferences>>>,
}

impl StyleStore {
    pub fn load(storage: LocalStorage) -> Self {
        let styles = storage
            .read(STYLES_KEY)
            .and_then(|v| serde_json::from_value::<StylePreferences>(v).ok())
            .unwrap_or_default()
            .clamped();
        StyleStore {
            styles: RwLock::new(styles),
            storage,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> StylePreferences {
        self.styles.read().expect("style store poisoned").clone()
    }

    pub fn replace(&self, next: StylePreferences) {
        let next = next.clamped();
        {
            let mut guard = self.styles.write().expect("style store poisoned");
            *guard = next.clone();
        }
        if let Ok(value) = serde_json::to_value(&next) {
            self.storage.write(STYLES_KEY, &value);
        }
        self.notify(&next);
    }

    /// Restores the defaults and removes the persisted record.
    pub fn reset(&self) {
        let defaults = StylePreferences::default();
        {
            let mut guard = self.styles.write().expect("style store poisoned");
            *guard = defaults.clone();
        }
        self.storage.remove(STYLES_KEY);
        self.notify(&defaults);
    }

    pub fn subscribe(&self, f: impl Fn(&StylePreferences) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .push(Box::new(f));
    }

    fn notify(&self, styles: &StylePreferences) {
        for subscriber in self.subscribers.lock().expect("subscriber list poisoned").iter() {
            subscriber(styles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn temp_storage() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let (_dir, storage) = temp_storage();
        assert!(storage.read(RESUME_KEY).is_none());
    }

    #[test]
    fn test_read_corrupt_json_is_none() {
        let (dir, storage) = temp_storage();
        std::fs::write(dir.path().join("resumeData.json"), "{not json").unwrap();
        assert!(storage.read(RESUME_KEY).is_none());
    }

    #[test]
    fn test_resume_store_persists_on_replace() {
        let (dir, storage) = temp_storage();
        let store = ResumeStore::load(storage);

        let mut record = store.snapshot();
        record.full_name = "Ada Lovelace".to_string();
        store.replace(record);

        // A fresh store over the same directory sees the persisted record.
        let reloaded = ResumeStore::load(LocalStorage::new(dir.path().to_path_buf()));
        assert_eq!(reloaded.snapshot().full_name, "Ada Lovelace");
    }

    #[test]
    fn test_resume_store_notifies_subscribers() {
        let (_dir, storage) = temp_storage();
        let store = ResumeStore::load(storage);
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.replace(ResumeRecord::default());
        store.replace(ResumeRecord::default());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_style_store_reset_clears_persisted_copy() {
        let (dir, storage) = temp_storage();
        let store = StyleStore::load(storage);

        let mut styles = store.snapshot();
        styles.primary_color = "#FF0000".to_string();
        store.replace(styles);
        assert!(dir.path().join("resumeStyles.json").exists());

        store.reset();
        assert_eq!(store.snapshot(), StylePreferences::default());
        assert!(!dir.path().join("resumeStyles.json").exists());
    }

    #[test]
    fn test_style_store_clamps_persisted_sizes() {
        let (dir, storage) = temp_storage();
        storage.write(
            STYLES_KEY,
            &serde_json::json!({"bodyFontSize": 99.0, "primaryColor": "#000000"}),
        );
        let store = StyleStore::load(LocalStorage::new(dir.path().to_path_buf()));
        assert_eq!(store.snapshot().body_font_size, 16.0);
        assert_eq!(store.snapshot().primary_color, "#000000");
    }
}
