//! Active locale resolution and the per-locale table cache.
//!
//! A [`LocaleResolver`] owns both pieces of state the UI depends on: which
//! locale is active and the tables loaded so far. Consumers read the current
//! [`LocaleSnapshot`] or subscribe to be told when it is replaced.


use polyglot_core::{
    error::PolyglotError,
    locale::Locale,
    table::{Translated, TranslationTable},
    traits::{PreferenceStore, TableSource},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::preference::{LOCALE_COOKIE, LOCALE_COOKIE_MAX_AGE};

/// Environment variables consulted when the OS reports no locale.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// The active locale together with its table.
///
/// Published as one value so a subscriber never pairs a new locale with the
/// previous locale's strings.
#[derive(Debug)]
pub struct LocaleSnapshot {
    pub locale: Locale,
    pub table: Arc<TranslationTable>,
}

impl LocaleSnapshot {
    /// Look up `key` in this snapshot's table.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> Translated {
        self.table.t(key, fallback)
    }
}

/// Resolves, persists, and publishes the active locale.
pub struct LocaleResolver {
    source: Arc<dyn TableSource>,
    prefs: Arc<dyn PreferenceStore>,
    tables: Mutex<HashMap<Locale, Arc<TranslationTable>>>,
    active: watch::Sender<Arc<LocaleSnapshot>>,
    /// Serializes locale switches. Holds whether the locale has been resolved.
    switch: Mutex<bool>,
}

impl LocaleResolver {
    /// Create a resolver. Until [`init`](Self::init) runs, the active locale is
    /// the default with an empty table.
    pub fn new(source: Arc<dyn TableSource>, prefs: Arc<dyn PreferenceStore>) -> Self {
        let (active, _) = watch::channel(Arc::new(LocaleSnapshot {
            locale: Locale::DEFAULT,
            table: Arc::new(TranslationTable::empty()),
        }));
        Self {
            source,
            prefs,
            tables: Mutex::new(HashMap::new()),
            active,
            switch: Mutex::new(false),
        }
    }

    /// Pick the starting locale: stored preference, then the environment
    /// hint's two-letter prefix, then the default.
    pub fn resolve_initial_locale(&self, hint: Option<&str>) -> Locale {
        if let Some(stored) = self.prefs.get(LOCALE_COOKIE) {
            match Locale::from_code(&stored) {
                Some(locale) => {
                    debug!("i18n: using stored preference {locale}");
                    return locale;
                }
                None => debug!("i18n: ignoring unsupported stored locale {stored:?}"),
            }
        }

        if let Some(locale) = hint.and_then(Locale::from_lang_tag) {
            debug!("i18n: using environment language {locale}");
            return locale;
        }

        Locale::DEFAULT
    }

    /// Resolve the starting locale and publish it with its table.
    ///
    /// Resolution happens once; later calls return the current snapshot.
    pub fn init(&self, hint: Option<&str>) -> Arc<LocaleSnapshot> {
        let mut resolved = self.switch.lock().unwrap_or_else(PoisonError::into_inner);
        if *resolved {
            return self.snapshot();
        }
        *resolved = true;
        let locale = self.resolve_initial_locale(hint);
        info!("i18n: active locale {locale}");
        self.publish(locale)
    }

    /// Table for `locale`, loading and memoizing it on first use.
    ///
    /// A table that fails to load is replaced by the default locale's table,
    /// and by an empty table if that fails too. Only successful loads are
    /// cached.
    pub fn load_table(&self, locale: Locale) -> Arc<TranslationTable> {
        if let Some(table) = self.cached_table(locale) {
            return table;
        }

        match self.source.load(locale) {
            Ok(table) => {
                info!("i18n: loaded translations for {locale}");
                let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
                Arc::clone(tables.entry(locale).or_insert_with(|| Arc::new(table)))
            }
            Err(e) => {
                warn!("i18n: {e}");
                if locale != Locale::DEFAULT {
                    self.load_table(Locale::DEFAULT)
                } else {
                    Arc::new(TranslationTable::empty())
                }
            }
        }
    }

    /// Cached table for `locale`, without loading.
    pub fn cached_table(&self, locale: Locale) -> Option<Arc<TranslationTable>> {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&locale)
            .cloned()
    }

    /// Locales whose tables are cached, in selector order.
    pub fn cached_locales(&self) -> Vec<Locale> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        Locale::ALL
            .into_iter()
            .filter(|l| tables.contains_key(l))
            .collect()
    }

    /// Look up `key` in the active table.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> Translated {
        self.active.borrow().t(key, fallback)
    }

    /// Switch to `locale`: persist it, load its table, then publish.
    ///
    /// A failed write is logged; the switch still applies to this process.
    /// Concurrent switches apply one at a time, so the stored preference
    /// always names the published locale.
    pub fn change_locale(&self, locale: Locale) -> Arc<LocaleSnapshot> {
        let mut resolved = self.switch.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self
            .prefs
            .set(LOCALE_COOKIE, locale.code(), LOCALE_COOKIE_MAX_AGE)
        {
            warn!("i18n: failed to persist locale {locale}: {e}");
        }
        *resolved = true;
        info!("i18n: locale changed to {locale}");
        self.publish(locale)
    }

    /// Parse `code` and switch to it. Unsupported codes change nothing.
    pub fn change_locale_code(&self, code: &str) -> Result<Arc<LocaleSnapshot>, PolyglotError> {
        let locale: Locale = code.parse()?;
        Ok(self.change_locale(locale))
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Arc<LocaleSnapshot>> {
        self.active.subscribe()
    }

    pub fn snapshot(&self) -> Arc<LocaleSnapshot> {
        Arc::clone(&self.active.borrow())
    }

    pub fn active_locale(&self) -> Locale {
        self.active.borrow().locale
    }

    pub fn available_locales(&self) -> &'static [Locale] {
        &Locale::ALL
    }

    fn publish(&self, locale: Locale) -> Arc<LocaleSnapshot> {
        let snapshot = Arc::new(LocaleSnapshot {
            locale,
            table: self.load_table(locale),
        });
        self.active.send_replace(Arc::clone(&snapshot));
        snapshot
    }
}

/// Language tag reported by the environment, if any.
pub fn env_language_hint() -> Option<String> {
    sys_locale::get_locale().or_else(|| hint_from_env(|var| std::env::var(var).ok()))
}

/// First non-empty locale variable, in POSIX precedence order.
fn hint_from_env(var: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|&name| var(name))
        .find(|v| !v.is_empty())
}
