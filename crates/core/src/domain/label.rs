// Sense classification and feature labels

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic role of a sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseKind {
    /// Core meaning of the lemma
    Literal,
    Metaphorical,
    /// Associated (non-metaphorical) extension
    Related,
}

impl SenseKind {
    /// Label written to the persisted record
    pub fn export_name(&self) -> &'static str {
        match self {
            SenseKind::Literal => "core",
            SenseKind::Related => "association",
            SenseKind::Metaphorical => "metaphor",
        }
    }

    /// Label shown to annotators
    pub fn display_name(&self) -> &'static str {
        match self {
            SenseKind::Literal => "Core",
            SenseKind::Related => "Associated",
            SenseKind::Metaphorical => "Metaphorical",
        }
    }

    /// Whether senses of this kind carry a resemblance edge
    pub fn is_connected(&self) -> bool {
        !matches!(self, SenseKind::Literal)
    }
}

impl std::fmt::Display for SenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenseKind::Literal => write!(f, "Literal"),
            SenseKind::Metaphorical => write!(f, "Metaphorical"),
            SenseKind::Related => write!(f, "Related"),
        }
    }
}

impl FromStr for SenseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "literal" | "core" => Ok(SenseKind::Literal),
            "metaphorical" | "metaphor" => Ok(SenseKind::Metaphorical),
            "related" | "association" | "associated" => Ok(SenseKind::Related),
            _ => Err(DomainError::InvalidLabel(s.to_string())),
        }
    }
}

/// Fate of an inherited feature along a resemblance edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureLabel {
    Kept,
    Lost,
    Modified,
}

impl FeatureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureLabel::Kept => "kept",
            FeatureLabel::Lost => "lost",
            FeatureLabel::Modified => "modified",
        }
    }
}

impl std::fmt::Display for FeatureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kept" => Ok(FeatureLabel::Kept),
            "lost" => Ok(FeatureLabel::Lost),
            "modified" => Ok(FeatureLabel::Modified),
            _ => Err(DomainError::InvalidLabel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sense_kind() {
        assert_eq!("literal".parse::<SenseKind>().unwrap(), SenseKind::Literal);
        assert_eq!("Metaphorical".parse::<SenseKind>().unwrap(), SenseKind::Metaphorical);
        assert_eq!("association".parse::<SenseKind>().unwrap(), SenseKind::Related);
    }

    #[test]
    fn test_parse_invalid_kind() {
        let err = "figurative".parse::<SenseKind>().unwrap_err();
        assert_eq!(err, DomainError::InvalidLabel("figurative".to_string()));
    }

    #[test]
    fn test_export_names() {
        assert_eq!(SenseKind::Literal.export_name(), "core");
        assert_eq!(SenseKind::Related.export_name(), "association");
        assert_eq!(SenseKind::Metaphorical.export_name(), "metaphor");
    }

    #[test]
    fn test_feature_label_serde() {
        let json = serde_json::to_string(&FeatureLabel::Modified).unwrap();
        assert_eq!(json, "\"modified\"");
        assert_eq!("LOST".parse::<FeatureLabel>().unwrap(), FeatureLabel::Lost);
    }
}
