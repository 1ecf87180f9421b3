//! # polyglot-core
//!
//! Core types, traits, configuration, and error handling for Polyglot.

pub mod config;
pub mod error;
pub mod locale;
pub mod table;
pub mod traits;

pub use error::PolyglotError;
pub use locale::Locale;
