//! # polyglot-i18n
//!
//! Locale resolution for Polyglot: where translation tables come from, how the
//! locale preference is persisted, and which locale is active.

pub mod preference;
pub mod resolver;
pub mod source;

pub use preference::{FilePreferenceStore, MemoryPreferenceStore, LOCALE_COOKIE};
pub use resolver::{env_language_hint, LocaleResolver, LocaleSnapshot};
pub use source::{DirTableSource, StaticTableSource};
