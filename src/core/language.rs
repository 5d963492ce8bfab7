//! Supported language catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::SessionError;

/// A language the portal can translate from or into.
///
/// `Auto` is only meaningful as a source language; the session rejects it as
/// a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "fa")]
    Persian,
    #[serde(rename = "nl")]
    Dutch,
    #[serde(rename = "pl")]
    Polish,
}

impl Language {
    /// Every language in picker order.
    pub const ALL: [Language; 20] = [
        Language::Auto,
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Russian,
        Language::Korean,
        Language::Italian,
        Language::Portuguese,
        Language::Arabic,
        Language::Hindi,
        Language::Bengali,
        Language::Punjabi,
        Language::Vietnamese,
        Language::Turkish,
        Language::Persian,
        Language::Dutch,
        Language::Polish,
    ];

    /// Languages that may be chosen as a translation target.
    pub fn targets() -> impl Iterator<Item = Language> {
        Self::ALL.into_iter().filter(|lang| !lang.is_auto())
    }

    /// Short language code used on the wire
    pub fn code(self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Russian => "ru",
            Language::Korean => "ko",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Arabic => "ar",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Punjabi => "pa",
            Language::Vietnamese => "vi",
            Language::Turkish => "tr",
            Language::Persian => "fa",
            Language::Dutch => "nl",
            Language::Polish => "pl",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Language::Auto => "Auto-detect",
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Russian => "Russian",
            Language::Korean => "Korean",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Arabic => "Arabic",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Punjabi => "Punjabi",
            Language::Vietnamese => "Vietnamese",
            Language::Turkish => "Turkish",
            Language::Persian => "Persian",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
        }
    }

    /// Whether this is the auto-detect pseudo language
    pub fn is_auto(self) -> bool {
        self == Language::Auto
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| SessionError::UnsupportedLanguage {
                code: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::German);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::English);
        assert_eq!("auto".parse::<Language>().unwrap(), Language::Auto);
    }

    #[test]
    fn test_parse_unknown_code() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedLanguage { ref code } if code == "xx"));
    }

    #[test]
    fn test_targets_exclude_auto() {
        assert_eq!(Language::targets().count(), Language::ALL.len() - 1);
        assert!(Language::targets().all(|lang| !lang.is_auto()));
    }

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.code()));
        }
    }
}
