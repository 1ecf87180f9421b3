//! MyMemory translation API backend.
//!
//! Docs: <https://mymemory.translated.net/doc/spec.php>

use async_trait::async_trait;
use polyglot_core::{
    config::TranslationConfig, error::PolyglotError, locale::Locale, traits::TranslationBackend,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Language code MyMemory expects for `locale`.
pub fn api_code(locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => "zh-CN",
        other => other.code(),
    }
}

/// Translated text at `responseData.translatedText`, if present and non-empty.
fn extract_translated(body: &Value) -> Option<String> {
    body.pointer("/responseData/translatedText")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Backend calling `GET {base_url}/get?q=..&langpair=src|dst`.
pub struct MyMemoryBackend {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryBackend {
    /// Create a backend whose HTTP client gives up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PolyglotError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PolyglotError::Remote(format!("mymemory: failed to build client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create from config values.
    pub fn from_config(cfg: &TranslationConfig) -> Result<Self, PolyglotError> {
        Self::new(cfg.base_url.clone(), cfg.timeout())
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryBackend {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Option<String>, PolyglotError> {
        let url = format!("{}/get", self.base_url.trim_end_matches('/'));
        let langpair = format!("{source}|{target}");

        debug!("mymemory: GET {url} langpair={langpair}");

        let resp = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| PolyglotError::Remote(format!("mymemory request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PolyglotError::Remote(format!(
                "mymemory returned {status}: {body}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| PolyglotError::Remote(format!("mymemory: failed to parse response: {e}")))?;

        Ok(extract_translated(&body))
    }
}
