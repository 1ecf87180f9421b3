use thiserror::Error;

/// Top-level error type for Polyglot.
#[derive(Debug, Error)]
pub enum PolyglotError {
    /// A locale code outside the supported set.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A translation table could not be loaded or parsed.
    #[error("failed to load translations for {locale}: {reason}")]
    TableLoad { locale: String, reason: String },

    /// Error from a remote HTTP API (translation, jokes).
    #[error("remote error: {0}")]
    Remote(String),

    /// Persisted preference could not be written.
    #[error("preference error: {0}")]
    Preference(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
