// Static lexical resource records (dictionary senses, glosses)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Synonym listed on a dictionary sense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub string: String,
    pub sense_id: String,
}

/// Per-sense information keyed by legacy sense id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseInfo {
    /// Dictionary headword the sense belongs to
    #[serde(default)]
    pub word: String,
    pub concept_id: String,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Gloss text with `[start, end, sense_id]` annotation spans (character offsets)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gloss {
    pub string: String,
    #[serde(default)]
    pub annotations: Vec<(usize, usize, String)>,
}

/// Everything needed to build one dictionary-backed sense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySense {
    pub legacy_id: String,
    pub info: SenseInfo,
    pub gloss: Gloss,
}

/// In-memory lexical resource, as produced by the resource loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceBundle {
    /// `word:pos` -> ordered legacy sense ids
    pub lemmas_to_senses: HashMap<String, Vec<String>>,
    /// legacy sense id -> sense info
    pub senses_to_info: HashMap<String, SenseInfo>,
    /// concept id -> gloss
    pub concepts_to_definitions: HashMap<String, Gloss>,
}

/// Splits a `word:pos` lemma key
pub fn split_lemma_key(lemma_key: &str) -> (&str, &str) {
    match lemma_key.split_once(':') {
        Some((word, pos)) => (word, pos),
        None => (lemma_key, ""),
    }
}
