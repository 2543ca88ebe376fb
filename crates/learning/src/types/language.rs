use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    #[default]
    Telugu,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Telugu => "telugu",
        }
    }

    /// Name given to the translator, including the native script.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "Telugu (తెలుగు)",
        }
    }

    /// Resolve the translator label for a raw `targetLanguage` value. Unknown
    /// languages are passed through untouched.
    pub fn label_for(raw: &str) -> String {
        raw.parse::<Language>()
            .map(|language| language.label().to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "telugu" | "te" => Ok(Language::Telugu),
            _ => Err(ParseError::UnknownLanguage(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_for_maps_known_languages() {
        assert_eq!(Language::label_for("telugu"), "Telugu (తెలుగు)");
        assert_eq!(Language::label_for("english"), "English");
    }

    #[test]
    fn label_for_passes_unknown_languages_through() {
        assert_eq!(Language::label_for("Hindi"), "Hindi");
    }
}
