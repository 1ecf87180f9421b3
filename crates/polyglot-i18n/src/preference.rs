//! Persisted locale preference, stored the way a browser stores a cookie.

use chrono::{DateTime, Duration, Utc};
use polyglot_core::{error::PolyglotError, traits::PreferenceStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Name of the locale preference record.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

/// Browsers cap cookie lifetimes at 400 days.
const MAX_COOKIE_AGE_SECS: u64 = 400 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieRecord {
    name: String,
    value: String,
    path: String,
    same_site: String,
    expires_at: DateTime<Utc>,
}

impl CookieRecord {
    fn new(name: &str, value: &str, max_age_secs: u64) -> Self {
        let secs = max_age_secs.min(MAX_COOKIE_AGE_SECS) as i64;
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            same_site: "Lax".to_string(),
            expires_at: Utc::now() + Duration::seconds(secs),
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// JSON file of cookie records. Expired records read as absent.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Sibling file a write is staged in before it replaces `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// All stored records. A missing or unreadable file yields none.
    fn read_records(&self) -> Vec<CookieRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("preferences: failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "preferences: ignoring corrupt file {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, name: &str) -> Option<String> {
        let now = Utc::now();
        self.read_records()
            .into_iter()
            .find(|r| r.name == name)
            .filter(|r| r.is_live(now))
            .map(|r| r.value)
    }

    fn set(&self, name: &str, value: &str, max_age_secs: u64) -> Result<(), PolyglotError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Utc::now();
        let mut records: Vec<CookieRecord> = self
            .read_records()
            .into_iter()
            .filter(|r| r.name != name && r.is_live(now))
            .collect();
        records.push(CookieRecord::new(name, value, max_age_secs));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PolyglotError::Preference(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
        }
        // Readers never take the lock, so replace the file in one rename.
        let json = serde_json::to_string_pretty(&records)?;
        let staging = self.staging_path();
        std::fs::write(&staging, json).map_err(|e| {
            PolyglotError::Preference(format!("failed to write {}: {e}", staging.display()))
        })?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            PolyglotError::Preference(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        debug!("preferences: {name}={value} saved to {}", self.path.display());
        Ok(())
    }
}

/// Process-local store without expiry.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `name`, as if a previous session had saved it.
    pub fn with(self, name: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set(&self, name: &str, value: &str, _max_age_secs: u64) -> Result<(), PolyglotError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("data/preferences.json")
    }

    #[test]
    fn test_file_store_roundtrip_creates_parent() {
        let path = scratch("__polyglot_test_prefs_roundtrip__");
        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.get(LOCALE_COOKIE), None);

        store.set(LOCALE_COOKIE, "ja", LOCALE_COOKIE_MAX_AGE).unwrap();
        assert!(path.exists());
        assert_eq!(store.get(LOCALE_COOKIE).as_deref(), Some("ja"));

        // Overwrite keeps one record.
        store.set(LOCALE_COOKIE, "es", LOCALE_COOKIE_MAX_AGE).unwrap();
        let records: Vec<CookieRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "es");
        assert_eq!(records[0].path, "/");
        assert_eq!(records[0].same_site, "Lax");

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_file_store_expiry() {
        let path = scratch("__polyglot_test_prefs_expiry__");
        let store = FilePreferenceStore::new(&path);
        store.set(LOCALE_COOKIE, "en", 0).unwrap();
        assert_eq!(store.get(LOCALE_COOKIE), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_file_store_one_year_expiry() {
        let record = CookieRecord::new(LOCALE_COOKIE, "fr", LOCALE_COOKIE_MAX_AGE);
        let days = (record.expires_at - Utc::now()).num_days();
        assert!((364..=365).contains(&days), "got {days} days");
    }

    #[test]
    fn test_file_store_corrupt_reads_absent_and_recovers() {
        let path = scratch("__polyglot_test_prefs_corrupt__");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "NEXT_LOCALE=zh; path=/").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.get(LOCALE_COOKIE), None);
        store.set(LOCALE_COOKIE, "zh", LOCALE_COOKIE_MAX_AGE).unwrap();
        assert_eq!(store.get(LOCALE_COOKIE).as_deref(), Some("zh"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_file_store_set_leaves_no_staging_file() {
        let path = scratch("__polyglot_test_prefs_staging__");
        let store = FilePreferenceStore::new(&path);
        store.set(LOCALE_COOKIE, "ja", LOCALE_COOKIE_MAX_AGE).unwrap();
        store.set(LOCALE_COOKIE, "en", LOCALE_COOKIE_MAX_AGE).unwrap();

        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("preferences.json")]);

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_file_store_reader_never_sees_partial_write() {
        let path = scratch("__polyglot_test_prefs_concurrent__");
        let store = FilePreferenceStore::new(&path);
        store.set(LOCALE_COOKIE, "fr", LOCALE_COOKIE_MAX_AGE).unwrap();

        let done = std::sync::atomic::AtomicBool::new(false);
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..200 {
                    let value = if i % 2 == 0 { "en" } else { "ja" };
                    store.set(LOCALE_COOKIE, value, LOCALE_COOKIE_MAX_AGE).unwrap();
                }
                done.store(true, std::sync::atomic::Ordering::SeqCst);
            });
            while !done.load(std::sync::atomic::Ordering::SeqCst) {
                let value = store.get(LOCALE_COOKIE);
                assert!(
                    matches!(value.as_deref(), Some("fr" | "en" | "ja")),
                    "reader saw {value:?}"
                );
            }
        });

        let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryPreferenceStore::new().with(LOCALE_COOKIE, "en");
        assert_eq!(store.get(LOCALE_COOKIE).as_deref(), Some("en"));
        store.set(LOCALE_COOKIE, "fr", 1).unwrap();
        assert_eq!(store.get(LOCALE_COOKIE).as_deref(), Some("fr"));
        assert_eq!(store.get("other"), None);
    }
}
