//! The fixed set of supported locales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolyglotError;

/// A supported UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
    Es,
    Ja,
    Zh,
}

impl Locale {
    /// Locale used when neither the cookie nor the environment yields a supported one.
    pub const DEFAULT: Locale = Locale::Fr;

    /// Every supported locale, in language selector order.
    pub const ALL: [Locale; 5] = [
        Locale::Fr,
        Locale::En,
        Locale::Es,
        Locale::Ja,
        Locale::Zh,
    ];

    /// Two-letter code, as stored in the cookie and used for table paths.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Es => "es",
            Self::Ja => "ja",
            Self::Zh => "zh",
        }
    }

    /// Native language name for the selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fr => "Fran\u{00e7}ais",
            Self::En => "English",
            Self::Es => "Espa\u{00f1}ol",
            Self::Ja => "\u{65e5}\u{672c}\u{8a9e}",
            Self::Zh => "\u{4e2d}\u{6587}",
        }
    }

    /// Flag shown next to the label on narrow layouts.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Fr => "\u{1f1eb}\u{1f1f7}",
            Self::En => "\u{1f1fa}\u{1f1f8}",
            Self::Es => "\u{1f1ea}\u{1f1f8}",
            Self::Ja => "\u{1f1ef}\u{1f1f5}",
            Self::Zh => "\u{1f1e8}\u{1f1f3}",
        }
    }

    /// Exact code match, `None` for anything outside the supported set.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Map an environment language tag (`en-US`, `ja_JP.UTF-8`) through its
    /// two-letter prefix.
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let prefix: String = tag.trim().chars().take(2).collect();
        if prefix.chars().count() < 2 {
            return None;
        }
        Self::from_code(&prefix)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = PolyglotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| PolyglotError::UnsupportedLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_french() {
        assert_eq!(Locale::DEFAULT, Locale::Fr);
        assert_eq!(Locale::default(), Locale::Fr);
    }

    #[test]
    fn test_parse_supported_codes() {
        for locale in Locale::ALL {
            assert_eq!(locale.code().parse::<Locale>().unwrap(), locale);
        }
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn test_parse_unsupported_code() {
        let err = "de".parse::<Locale>().unwrap_err();
        assert!(matches!(err, PolyglotError::UnsupportedLocale(ref c) if c == "de"));
        assert!("".parse::<Locale>().is_err());
        assert!("zh-CN".parse::<Locale>().is_err());
    }

    #[test]
    fn test_from_lang_tag() {
        assert_eq!(Locale::from_lang_tag("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_lang_tag("ja_JP.UTF-8"), Some(Locale::Ja));
        assert_eq!(Locale::from_lang_tag("zh"), Some(Locale::Zh));
        assert_eq!(Locale::from_lang_tag("de-DE"), None);
        assert_eq!(Locale::from_lang_tag("e"), None);
        assert_eq!(Locale::from_lang_tag(""), None);
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Locale::Ja).unwrap();
        assert_eq!(json, "\"ja\"");
        let back: Locale = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(back, Locale::Es);
    }
}
