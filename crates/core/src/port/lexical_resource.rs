// Lexical Resource Port (read-only dictionary lookups)

use crate::domain::{DictionarySense, ResourceBundle};
use crate::error::{AppError, Result};
use tracing::debug;

/// Source of dictionary senses, consumed when a lemma is opened
pub trait LexicalResource: Send + Sync {
    /// Legacy sense ids of a `word:pos` lemma key, in dictionary order
    fn sense_ids(&self, lemma_key: &str) -> Result<Vec<String>>;

    /// Resolves every sense of a lemma into a `DictionarySense`
    ///
    /// # Errors
    /// `NotFound` for an unknown lemma key, `Resource` when a sense or its
    /// gloss is missing from the resource.
    fn senses_for_lemma(&self, lemma_key: &str) -> Result<Vec<DictionarySense>>;
}

impl LexicalResource for ResourceBundle {
    fn sense_ids(&self, lemma_key: &str) -> Result<Vec<String>> {
        self.lemmas_to_senses
            .get(lemma_key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("lemma {}", lemma_key)))
    }

    fn senses_for_lemma(&self, lemma_key: &str) -> Result<Vec<DictionarySense>> {
        let sense_ids = self.sense_ids(lemma_key)?;
        let mut senses = Vec::with_capacity(sense_ids.len());

        for legacy_id in sense_ids {
            let info = self.senses_to_info.get(&legacy_id).ok_or_else(|| {
                AppError::Resource(format!("no sense info for {}", legacy_id))
            })?;
            let gloss = self
                .concepts_to_definitions
                .get(&info.concept_id)
                .ok_or_else(|| {
                    AppError::Resource(format!(
                        "no definition for concept {} of {}",
                        info.concept_id, legacy_id
                    ))
                })?;
            senses.push(DictionarySense {
                legacy_id,
                info: info.clone(),
                gloss: gloss.clone(),
            });
        }

        debug!(lemma = %lemma_key, senses = senses.len(), "Resolved dictionary senses");
        Ok(senses)
    }
}
