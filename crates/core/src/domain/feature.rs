// Semantic features declared on a sense

use super::constants::FORBIDDEN_FEATURE_CHARS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature identifier, `{display_id}:{counter}` with a lemma-wide counter
pub type FeatureId = String;

/// Feature id -> feature text
pub type FeatureMap = BTreeMap<FeatureId, String>;

/// Feature text must be non-empty and free of `. # $ / [ ]`
pub fn is_valid_feature(text: &str) -> bool {
    !text.is_empty() && !text.contains(&FORBIDDEN_FEATURE_CHARS[..])
}

/// Features a sense declares itself (as opposed to inherited ones)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeatures {
    entries: FeatureMap,
}

impl LocalFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty feature under an id allocated by the owning lemma
    pub fn add(&mut self, feature_id: FeatureId) {
        self.entries.entry(feature_id).or_default();
    }

    /// Returns false if the feature does not exist
    pub fn set_text(&mut self, feature_id: &str, text: impl Into<String>) -> bool {
        match self.entries.get_mut(feature_id) {
            Some(entry) => {
                *entry = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, feature_id: &str) -> bool {
        self.entries.remove(feature_id).is_some()
    }

    pub fn get(&self, feature_id: &str) -> Option<&str> {
        self.entries.get(feature_id).map(String::as_str)
    }

    pub fn entries(&self) -> &FeatureMap {
        &self.entries
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_feature_text() {
        assert!(is_valid_feature("is red"));
        assert!(!is_valid_feature(""));
        assert!(!is_valid_feature("is red."));
        assert!(!is_valid_feature("a/b"));
        assert!(!is_valid_feature("has [brackets]"));
        assert!(!is_valid_feature("#tag"));
    }

    #[test]
    fn test_add_and_remove() {
        let mut features = LocalFeatures::new();
        features.add("1:0".to_string());
        features.add("1:1".to_string());
        assert_eq!(features.len(), 2);
        assert_eq!(features.get("1:0"), Some(""));

        assert!(features.remove("1:0"));
        assert!(!features.remove("1:0"));
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_set_text_unknown_feature() {
        let mut features = LocalFeatures::new();
        assert!(!features.set_text("1:0", "is red"));
        features.add("1:0".to_string());
        assert!(features.set_text("1:0", "is red"));
        assert_eq!(features.get("1:0"), Some("is red"));

        // Re-adding an existing id keeps its text
        features.add("1:0".to_string());
        assert_eq!(features.get("1:0"), Some("is red"));
    }
}
