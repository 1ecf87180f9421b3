use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.polyglot.log_level, "info");
    assert_eq!(cfg.i18n.locales_dir, "locales");
    assert_eq!(cfg.translation.timeout(), Duration::from_secs(10));
    assert_eq!(cfg.translation.cache_ttl(), Duration::from_secs(300));
    assert_eq!(cfg.jokes.timeout_secs, 10);
    assert_eq!(cfg.jokes.base_url, "https://official-joke-api.appspot.com");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let toml_str = r#"
        [translation]
        cache_ttl_secs = 60

        [i18n]
        locales_dir = "/srv/locales"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.translation.cache_ttl_secs, 60);
    assert_eq!(cfg.translation.timeout_secs, 10);
    assert_eq!(
        cfg.translation.base_url,
        "https://api.mymemory.translated.net"
    );
    assert_eq!(cfg.i18n.locales_dir, "/srv/locales");
    assert_eq!(cfg.i18n.preference_file, "~/.polyglot/data/preferences.json");
    assert_eq!(cfg.polyglot.data_dir, "~/.polyglot");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__polyglot_config__.toml").unwrap();
    assert_eq!(cfg.translation.cache_ttl_secs, 300);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let path = std::env::temp_dir().join("__polyglot_test_bad_config__.toml");
    std::fs::write(&path, "[translation\ncache_ttl_secs = ").unwrap();

    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, PolyglotError::Config(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_shellexpand_home() {
    let expanded = shellexpand("~/.polyglot");
    assert!(!expanded.starts_with("~/") || std::env::var_os("HOME").is_none());
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
}
