use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

/// Translation direction handling
///
/// This module defines the two directions the engine serves and resolves
/// them to ISO 639 languages for display and script selection.
/// A translation direction, selecting one of the two loaded model
/// instances and the matching script heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// English to Arabic
    #[serde(rename = "en-ar")]
    EnToAr,

    /// Arabic to English
    #[serde(rename = "ar-en")]
    ArToEn,
}

impl Direction {
    /// Both directions in a fixed order, used when loading models
    pub const ALL: [Direction; 2] = [Direction::EnToAr, Direction::ArToEn];

    /// The language translated from
    pub fn source(&self) -> Language {
        match self {
            Self::EnToAr => Language::Eng,
            Self::ArToEn => Language::Ara,
        }
    }

    /// The language translated into
    pub fn target(&self) -> Language {
        match self {
            Self::EnToAr => Language::Ara,
            Self::ArToEn => Language::Eng,
        }
    }

    /// The opposite direction
    pub fn reversed(&self) -> Direction {
        match self {
            Self::EnToAr => Self::ArToEn,
            Self::ArToEn => Self::EnToAr,
        }
    }

    /// Human-readable pair name, e.g. "English → Arabic"
    pub fn display_name(&self) -> String {
        format!("{} → {}", self.source().to_name(), self.target().to_name())
    }

    /// Wire identifier, e.g. "en-ar"
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::EnToAr => "en-ar".to_string(),
            Self::ArToEn => "ar-en".to_string(),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en-ar" => Ok(Self::EnToAr),
            "ar-en" => Ok(Self::ArToEn),
            _ => Err(anyhow!(
                "Invalid direction: {}. Use \"en-ar\" or \"ar-en\"",
                s
            )),
        }
    }
}
