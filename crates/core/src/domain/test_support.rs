// Shared fixtures for domain tests

use super::lemma::Lemma;
use super::resource::{DictionarySense, Gloss, SenseInfo, Synonym};

pub(crate) fn dictionary_sense(legacy_id: &str, gloss: &str, examples: &[&str]) -> DictionarySense {
    DictionarySense {
        legacy_id: legacy_id.to_string(),
        info: SenseInfo {
            word: "bank".to_string(),
            concept_id: format!("concept-{}", legacy_id),
            synonyms: vec![Synonym {
                string: "bank".to_string(),
                sense_id: legacy_id.to_string(),
            }],
            examples: examples.iter().map(|e| e.to_string()).collect(),
        },
        gloss: Gloss {
            string: gloss.to_string(),
            annotations: Vec::new(),
        },
    }
}

/// `bank:noun` with a river-bank sense (1) and a financial-institution sense (2)
pub(crate) fn bank_lemma() -> Lemma {
    Lemma::new(
        "bank",
        "noun",
        vec![
            dictionary_sense(
                "bank%1:17:01::",
                "sloping land beside a body of water",
                &["they pulled the canoe up on the bank"],
            ),
            dictionary_sense(
                "bank%1:14:00::",
                "a financial institution that accepts deposits",
                &["he cashed a check at the bank"],
            ),
        ],
    )
}
