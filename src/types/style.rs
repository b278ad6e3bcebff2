//! Stylistic register of generated content.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The five recognized writing styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Technical,
    Professional,
    Casual,
    Academic,
    Creative,
}

impl Style {
    /// All styles, in presentation order.
    pub const ALL: [Style; 5] = [
        Style::Technical,
        Style::Professional,
        Style::Casual,
        Style::Academic,
        Style::Creative,
    ];

    /// Internal value, as substituted into the prompt.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Technical => "technical",
            Style::Professional => "professional",
            Style::Casual => "casual",
            Style::Academic => "academic",
            Style::Creative => "creative",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Style::Technical => "Technical",
            Style::Professional => "Professional",
            Style::Casual => "Casual",
            Style::Academic => "Academic",
            Style::Creative => "Creative",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the internal value only. No trimming or case folding.
impl FromStr for Style {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStyle(s.to_string()))
    }
}
