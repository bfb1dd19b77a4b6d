//! Publication language enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Languages a content item can be published in.
///
/// Each language variant of a content item is a separate row; the variants
/// are tied together by a shared translation set id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "language", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese.
    Ja,
    /// Korean.
    Ko,
    /// English.
    En,
    /// Chinese.
    Zh,
}

impl Language {
    /// Return the language as a lowercase ISO 639-1 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            _ => Err(AppError::validation(format!(
                "Invalid language: '{s}'. Expected one of: ja, ko, en, zh"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Ja);
        assert_eq!("KO".parse::<Language>().unwrap(), Language::Ko);
        assert!("fr".parse::<Language>().is_err());
    }
}
