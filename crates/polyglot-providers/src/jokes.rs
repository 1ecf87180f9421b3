//! Random joke API client.
//!
//! The API serves English jokes; callers translate them for display.

use polyglot_core::{config::JokesConfig, error::PolyglotError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A two-part joke as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    /// Category, e.g. `general` or `programming`.
    #[serde(rename = "type")]
    pub kind: String,
    pub setup: String,
    pub punchline: String,
}

/// Client for `GET {base_url}/random_joke`.
pub struct JokeClient {
    client: reqwest::Client,
    base_url: String,
}

impl JokeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PolyglotError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PolyglotError::Remote(format!("jokes: failed to build client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create from config values.
    pub fn from_config(cfg: &JokesConfig) -> Result<Self, PolyglotError> {
        Self::new(cfg.base_url.clone(), cfg.timeout())
    }

    /// Fetch one random joke.
    pub async fn fetch_random_joke(&self) -> Result<Joke, PolyglotError> {
        let url = format!("{}/random_joke", self.base_url.trim_end_matches('/'));
        debug!("jokes: GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PolyglotError::Remote(format!("jokes request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(PolyglotError::Remote(format!("jokes API returned {status}")));
        }

        resp.json()
            .await
            .map_err(|e| PolyglotError::Remote(format!("jokes: failed to parse response: {e}")))
    }
}
