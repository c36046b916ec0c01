use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" | "fr-ma" => Some(Language::Fr),
            "en" | "en-us" | "en-gb" => Some(Language::En),
            "ar" | "ar-ma" | "ar-sa" => Some(Language::Ar),
            _ => None,
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::Fr | Language::En => TextDirection::Ltr,
        }
    }

    /// Language name used when hinting the chat model.
    pub fn english_name(self) -> &'static str {
        match self {
            Language::Fr => "French",
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// `lang` and `dir` attributes of the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAttributes {
    pub lang: Language,
    pub dir: TextDirection,
}

impl From<Language> for DocumentAttributes {
    fn from(lang: Language) -> Self {
        Self {
            lang,
            dir: lang.direction(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_follows_language() {
        assert_eq!(DocumentAttributes::from(Language::Ar).dir, TextDirection::Rtl);
        assert_eq!(DocumentAttributes::from(Language::Fr).dir, TextDirection::Ltr);
        assert_eq!(DocumentAttributes::from(Language::En).dir, TextDirection::Ltr);
        assert_eq!(TextDirection::Rtl.as_str(), "rtl");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Language::default(), Language::Fr);
        assert_eq!("AR".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!(Language::from_code("en-GB"), Some(Language::En));
        assert!("de".parse::<Language>().is_err());
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
