//! Command handlers. Each returns the text to print so it can be tested
//! without a terminal.

mod joke;


pub use joke::{joke_error, present_joke};

use polyglot_core::{config::Config, locale::Locale, table::Translated, traits::TableSource};
use polyglot_i18n::{DirTableSource, LocaleResolver};
use polyglot_providers::TranslationCache;

/// Active locale followed by every available locale, the active one marked.
pub fn locale_listing(resolver: &LocaleResolver) -> String {
    let active = resolver.active_locale();
    let mut out = format!("Active locale: {} ({})\n", active, active.label());
    for locale in resolver.available_locales() {
        let marker = if *locale == active { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {} {} {}\n",
            locale.code(),
            locale.flag(),
            locale.label()
        ));
    }
    out
}

/// Lines to print for `key`: one for a text, one per item for a list.
pub fn lookup_lines(resolver: &LocaleResolver, key: &str, fallback: Option<&str>) -> Vec<String> {
    match resolver.t(key, fallback) {
        Translated::Text(s) => vec![s],
        Translated::List(items) => items.into_iter().map(|i| format!("- {i}")).collect(),
    }
}

/// Translate free text, defaulting the target to the active locale.
pub async fn translate_text(
    resolver: &LocaleResolver,
    cache: &TranslationCache,
    text: &str,
    to: Option<Locale>,
    from: Locale,
) -> String {
    let target = to.unwrap_or_else(|| resolver.active_locale());
    cache.translate(text, target, from).await
}

/// Human-readable health report for `config_path`.
pub fn status_report(config_path: &str, cfg: &Config, source: &DirTableSource) -> String {
    let mut out = String::from("Polyglot \u{2014} Status\n\n");
    out.push_str(&format!("Config: {config_path}\n"));
    out.push_str(&format!("Locales dir: {}\n", source.root().display()));
    out.push_str(&format!("Preference file: {}\n\n", cfg.i18n.preference_file));

    for locale in Locale::ALL {
        let state = match source.load(locale) {
            Ok(_) => "ok".to_string(),
            Err(e) => format!("unavailable ({e})"),
        };
        let default = if locale == Locale::DEFAULT { " [default]" } else { "" };
        out.push_str(&format!("  {}{default}: {state}\n", locale.code()));
    }

    out.push_str(&format!(
        "\nTranslation API: {} (timeout {}s, cache {}s)\n",
        cfg.translation.base_url, cfg.translation.timeout_secs, cfg.translation.cache_ttl_secs
    ));
    out.push_str(&format!(
        "Joke API: {} (timeout {}s)\n",
        cfg.jokes.base_url, cfg.jokes.timeout_secs
    ));
    out
}
