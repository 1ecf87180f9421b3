use crate::{error::PolyglotError, locale::Locale, table::TranslationTable};
use async_trait::async_trait;

/// Where translation tables come from.
///
/// Implementations only load; memoization and fallback to the default locale
/// belong to the resolver.
pub trait TableSource: Send + Sync {
    /// Load the table for `locale`, or report why it is unavailable.
    fn load(&self, locale: Locale) -> Result<TranslationTable, PolyglotError>;
}

/// Cookie-like key/value store for persisted user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Current value of `name`, or `None` if unset or expired.
    fn get(&self, name: &str) -> Option<String>;

    /// Persist `value` under `name` for `max_age_secs` seconds.
    fn set(&self, name: &str, value: &str, max_age_secs: u64) -> Result<(), PolyglotError>;
}

/// Remote machine-translation service.
///
/// Language codes are the service's own (see the locale adapters in
/// `polyglot-providers`).
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target`.
    ///
    /// `Ok(None)` means the service answered without a usable translation.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Option<String>, PolyglotError>;
}
