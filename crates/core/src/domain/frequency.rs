// Per-annotator feature frequency counts

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered `feature text -> count` map.
///
/// Serialized as a JSON object; key order is preserved in both directions so
/// suggestion ties stay stable across a save/load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFrequencies {
    entries: Vec<(String, u64)>,
}

impl FeatureFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(text, _)| text == feature)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(text, count)| (text.as_str(), *count))
    }

    /// Increments the count of every feature, once per occurrence
    pub fn record<I, S>(&mut self, features: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for feature in features {
            let feature = feature.as_ref();
            match self.entries.iter_mut().find(|(text, _)| text == feature) {
                Some((_, count)) => *count += 1,
                None => self.entries.push((feature.to_string(), 1)),
            }
        }
    }

    /// Feature texts by descending count; ties keep insertion order
    pub fn suggestions(&self) -> Vec<String> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(text, _)| text.clone()).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FeatureFrequencies {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut frequencies = Self::new();
        for (text, count) in iter {
            let text = text.into();
            match frequencies.entries.iter_mut().find(|(t, _)| *t == text) {
                Some((_, existing)) => *existing = count,
                None => frequencies.entries.push((text, count)),
            }
        }
        frequencies
    }
}

impl Serialize for FeatureFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (text, count) in &self.entries {
            map.serialize_entry(text, count)?;
        }
        map.end()
    }
}

struct FrequencyVisitor;

impl<'de> Visitor<'de> for FrequencyVisitor {
    type Value = FeatureFrequencies;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of feature text to count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((text, count)) = access.next_entry::<String, u64>()? {
            entries.push((text, count));
        }
        Ok(entries.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for FeatureFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FrequencyVisitor)
    }
}
