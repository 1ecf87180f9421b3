//! Random joke, shown in the active locale.

use polyglot_i18n::LocaleSnapshot;
use polyglot_providers::{Joke, TranslationCache};
use std::fmt;

const TITLE_FALLBACK: &str = "Random Joke";
const ERROR_FALLBACK: &str = "Unable to load a joke. Please try again.";

/// A joke ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeView {
    pub title: String,
    pub kind: String,
    pub setup: String,
    pub punchline: String,
}

impl fmt::Display for JokeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "[{}]", self.kind.to_uppercase())?;
        writeln!(f, "{}", self.setup)?;
        write!(f, "{}", self.punchline)
    }
}

/// Translate the English joke into the snapshot's locale.
///
/// Setup and punchline are translated concurrently; the category label comes
/// from the static table, falling back to the raw category.
pub async fn present_joke(
    snapshot: &LocaleSnapshot,
    cache: &TranslationCache,
    joke: &Joke,
) -> JokeView {
    let (setup, punchline) = tokio::join!(
        cache.translate_from_en(&joke.setup, snapshot.locale),
        cache.translate_from_en(&joke.punchline, snapshot.locale),
    );

    let kind_key = format!("jokes.types.{}", joke.kind);
    JokeView {
        title: snapshot
            .t("jokes.labels.title", Some(TITLE_FALLBACK))
            .as_text()
            .into_owned(),
        kind: snapshot
            .t(&kind_key, Some(joke.kind.as_str()))
            .as_text()
            .into_owned(),
        setup,
        punchline,
    }
}

/// Message shown when no joke could be fetched.
pub fn joke_error(snapshot: &LocaleSnapshot) -> String {
    snapshot
        .t("jokes.labels.error", Some(ERROR_FALLBACK))
        .as_text()
        .into_owned()
}
