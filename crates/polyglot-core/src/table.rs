//! Translation tables: a nested tree of UI strings addressed by dotted keys.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A node in a translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, TranslationValue>),
}

/// The static translation table for one locale. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    root: BTreeMap<String, TranslationValue>,
}

/// Result of a lookup: callers must handle both leaf shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translated {
    Text(String),
    List(Vec<String>),
}

impl Translated {
    /// Render as a single string; list items are joined with `", "`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(", ")),
        }
    }

    /// Render as a list; a text becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s],
            Self::List(items) => items,
        }
    }
}

impl TranslationTable {
    /// An empty table. Every lookup against it falls back.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a table from its JSON document. The root must be an object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk `key` split on `.` through nested mappings.
    ///
    /// `None` means the key is missing; a present empty string is `Some(Text(""))`.
    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                TranslationValue::Map(children) => node = children.get(segment)?,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Look up a leaf value, falling back to `fallback` or else the key itself.
    ///
    /// A key that stops on a nested mapping is not a leaf and falls back too.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> Translated {
        match self.get(key) {
            Some(TranslationValue::Text(s)) => Translated::Text(s.clone()),
            Some(TranslationValue::List(items)) => Translated::List(items.clone()),
            Some(TranslationValue::Map(_)) | None => {
                Translated::Text(fallback.unwrap_or(key).to_string())
            }
        }
    }
}
