//! Default value functions used by serde for config deserialization.

pub fn default_data_dir() -> String {
    "~/.polyglot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_locales_dir() -> String {
    "locales".to_string()
}

pub fn default_preference_file() -> String {
    "~/.polyglot/data/preferences.json".to_string()
}

pub fn default_translation_base_url() -> String {
    "https://api.mymemory.translated.net".to_string()
}

pub fn default_jokes_base_url() -> String {
    "https://official-joke-api.appspot.com".to_string()
}

pub fn default_timeout_secs() -> u64 {
    10
}

pub fn default_cache_ttl_secs() -> u64 {
    300
}
