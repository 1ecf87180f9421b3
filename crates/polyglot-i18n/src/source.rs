//! Translation table sources.

use polyglot_core::{
    error::PolyglotError, locale::Locale, table::TranslationTable, traits::TableSource,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// File name of the table inside each locale directory.
const TABLE_FILE: &str = "common.json";

fn load_error(locale: Locale, reason: String) -> PolyglotError {
    PolyglotError::TableLoad {
        locale: locale.code().to_string(),
        reason,
    }
}

/// Reads `<root>/<locale>/common.json`.
#[derive(Debug, Clone)]
pub struct DirTableSource {
    root: PathBuf,
}

impl DirTableSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table document for `locale`.
    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.root.join(locale.code()).join(TABLE_FILE)
    }
}

impl TableSource for DirTableSource {
    fn load(&self, locale: Locale) -> Result<TranslationTable, PolyglotError> {
        let path = self.path_for(locale);
        debug!("i18n: reading {}", path.display());
        let content = std::fs::read_to_string(&path)
            .map_err(|e| load_error(locale, format!("{}: {e}", path.display())))?;
        TranslationTable::from_json(&content)
            .map_err(|e| load_error(locale, format!("{}: {e}", path.display())))
    }
}

/// In-memory JSON documents keyed by locale. Counts every load attempt.
#[derive(Debug, Default)]
pub struct StaticTableSource {
    documents: HashMap<Locale, String>,
    loads: AtomicUsize,
}

impl StaticTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the document for `locale`.
    pub fn with(mut self, locale: Locale, json: impl Into<String>) -> Self {
        self.documents.insert(locale, json.into());
        self
    }

    /// Number of `load` calls so far, successful or not.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl TableSource for StaticTableSource {
    fn load(&self, locale: Locale) -> Result<TranslationTable, PolyglotError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let json = self
            .documents
            .get(&locale)
            .ok_or_else(|| load_error(locale, "no table registered".to_string()))?;
        TranslationTable::from_json(json).map_err(|e| load_error(locale, e.to_string()))
    }
}
