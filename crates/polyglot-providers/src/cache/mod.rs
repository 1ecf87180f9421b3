//! Time-boxed cache in front of a [`TranslationBackend`].
//!
//! Entries are keyed by `(source, target, text)` using the backend's language
//! codes. An entry expires `ttl` after it was stored; reads never extend it,
//! and expired entries are simply overwritten by the next miss.
//!
//! Concurrent misses for the same key each reach the backend; the cache only
//! serves repeats once the first call has been stored.


use polyglot_core::{
    config::TranslationConfig, error::PolyglotError, locale::Locale, traits::TranslationBackend,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::mymemory::{api_code, MyMemoryBackend};

/// Language runtime content is written in unless stated otherwise.
pub const DEFAULT_SOURCE: Locale = Locale::En;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source: &'static str,
    target: &'static str,
    text: String,
}

impl CacheKey {
    fn new(text: &str, target: Locale, source: Locale) -> Self {
        Self {
            source: api_code(source),
            target: api_code(target),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Translates runtime text, remembering results for `ttl`.
///
/// Never fails: when the backend errors or times out, the original text is
/// returned and nothing is cached.
pub struct TranslationCache {
    backend: Arc<dyn TranslationBackend>,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    timeout: Duration,
}

impl TranslationCache {
    pub fn new(backend: Arc<dyn TranslationBackend>, ttl: Duration, timeout: Duration) -> Self {
        Self {
            backend,
            entries: Mutex::new(HashMap::new()),
            ttl,
            timeout,
        }
    }

    /// Cache in front of the MyMemory backend described by `cfg`.
    pub fn from_config(cfg: &TranslationConfig) -> Result<Self, PolyglotError> {
        let backend = MyMemoryBackend::from_config(cfg)?;
        Ok(Self::new(Arc::new(backend), cfg.cache_ttl(), cfg.timeout()))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Translate `text` from `source` into `target`.
    pub async fn translate(&self, text: &str, target: Locale, source: Locale) -> String {
        if text.is_empty() || target == source {
            return text.to_string();
        }

        let key = CacheKey::new(text, target, source);
        if let Some(hit) = self.fresh(&key) {
            debug!("translate: cache hit {}|{}", key.source, key.target);
            return hit;
        }
        debug!("translate: cache miss {}|{}", key.source, key.target);

        let call = self.backend.translate(text, key.source, key.target);
        let translated = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(Some(t))) => t,
            Ok(Ok(None)) => {
                debug!(
                    "translate: {} returned no text, keeping original",
                    self.backend.name()
                );
                text.to_string()
            }
            Ok(Err(e)) => {
                warn!("translate: {e}");
                return text.to_string();
            }
            Err(_) => {
                warn!(
                    "translate: {} timed out after {}s",
                    self.backend.name(),
                    self.timeout.as_secs()
                );
                return text.to_string();
            }
        };

        self.store(key, translated.clone());
        translated
    }

    /// Translate English `text` into `target`.
    pub async fn translate_from_en(&self, text: &str, target: Locale) -> String {
        self.translate(text, target, DEFAULT_SOURCE).await
    }

    /// Unexpired cached value for this triple, without calling the backend.
    pub fn cached(&self, text: &str, target: Locale, source: Locale) -> Option<String> {
        self.fresh(&CacheKey::new(text, target, source))
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fresh(&self, key: &CacheKey) -> Option<String> {
        let now = Instant::now();
        self.lock()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    fn store(&self, key: CacheKey, value: String) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.lock().insert(key, entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
