// Lemma Aggregate
//
// Sole owner of a lemma's senses. Senses refer to each other by display id;
// every lookup goes through the lemma's map.

use super::constants::{
    DICTIONARY_BACKEND_PREFIX, DICTIONARY_LABEL_OPTIONS, SPLIT_LITERAL_LABEL_OPTIONS,
    SPLIT_LITERAL_SUFFIX, SPLIT_METAPHORICAL_LABEL_OPTIONS, SPLIT_METAPHORICAL_SUFFIX,
    VIRTUAL_BACKEND_PREFIX, VIRTUAL_LABEL_OPTIONS,
};
use super::definition::{CustomDefinition, Definition, DictionaryDefinition};
use super::error::{DomainError, Result};
use super::feature::FeatureId;
use super::label::{FeatureLabel, SenseKind};
use super::resource::DictionarySense;
use super::sense::{Sense, SenseId, SenseRole, SplitPair, SplitRole};
use std::collections::HashMap;
use tracing::{info, warn};

/// One word + part of speech under annotation
#[derive(Debug, Clone)]
pub struct Lemma {
    pub(super) word: String,
    pub(super) pos: String,
    /// Row order; drives the persisted `position`
    pub(super) order: Vec<SenseId>,
    pub(super) senses: HashMap<SenseId, Sense>,
    /// Next integer display id handed to a virtual sense
    pub(super) next_display_index: usize,
    /// Next counter for `new:<n>` backend ids
    pub(super) next_virtual_id: usize,
    /// Next feature counter; never reset, so ids survive merges unique
    pub(super) next_feature_index: usize,
    /// Bumped on every successful mutation
    pub(super) revision: u64,
}

/// Logs a rejected precondition before handing the error back
fn rejected<T>(operation: &str, err: DomainError) -> Result<T> {
    warn!(operation = operation, error = %err, "Lemma operation rejected");
    Err(err)
}

impl Lemma {
    /// Builds one unlabelled sense per dictionary sense, in resource order,
    /// with display ids `1, 2, ...`.
    pub fn new(word: impl Into<String>, pos: impl Into<String>, senses: Vec<DictionarySense>) -> Self {
        let mut order = Vec::with_capacity(senses.len());
        let mut map = HashMap::with_capacity(senses.len());

        for (index, dictionary_sense) in senses.iter().enumerate() {
            let display_id = (index + 1).to_string();
            let sense = Sense::new(
                display_id.clone(),
                format!("{}{}", DICTIONARY_BACKEND_PREFIX, dictionary_sense.legacy_id),
                Some(dictionary_sense.info.word.clone()).filter(|word| !word.is_empty()),
                Definition::Dictionary(DictionaryDefinition::from_sense(dictionary_sense)),
                DICTIONARY_LABEL_OPTIONS.to_vec(),
            );
            order.push(display_id.clone());
            map.insert(display_id, sense);
        }

        let lemma = Self {
            word: word.into(),
            pos: pos.into(),
            next_display_index: order.len() + 1,
            order,
            senses: map,
            next_virtual_id: 1,
            next_feature_index: 0,
            revision: 0,
        };
        info!(
            word = %lemma.word,
            pos = %lemma.pos,
            senses = lemma.order.len(),
            "Lemma initialised"
        );
        lemma
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn pos(&self) -> &str {
        &self.pos
    }

    /// `word:pos`
    pub fn lemma_key(&self) -> String {
        format!("{}:{}", self.word, self.pos)
    }

    pub fn order(&self) -> &[SenseId] {
        &self.order
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, sense_id: &str) -> bool {
        self.senses.contains_key(sense_id)
    }

    pub fn get_sense(&self, sense_id: &str) -> Option<&Sense> {
        self.senses.get(sense_id)
    }

    pub(super) fn sense(&self, sense_id: &str) -> Result<&Sense> {
        self.senses
            .get(sense_id)
            .ok_or_else(|| DomainError::SenseNotFound(sense_id.to_string()))
    }

    pub(super) fn sense_mut(&mut self, sense_id: &str) -> Result<&mut Sense> {
        self.senses
            .get_mut(sense_id)
            .ok_or_else(|| DomainError::SenseNotFound(sense_id.to_string()))
    }

    /// Senses in row order
    pub fn all_senses(&self) -> Vec<&Sense> {
        self.order
            .iter()
            .filter_map(|sense_id| self.senses.get(sense_id))
            .collect()
    }

    fn senses_of_kind(&self, kind: SenseKind) -> Vec<&Sense> {
        self.all_senses()
            .into_iter()
            .filter(|sense| sense.kind() == Some(kind))
            .collect()
    }

    pub fn metaphorical_senses(&self) -> Vec<&Sense> {
        self.senses_of_kind(SenseKind::Metaphorical)
    }

    pub fn literal_senses(&self) -> Vec<&Sense> {
        self.senses_of_kind(SenseKind::Literal)
    }

    pub fn related_senses(&self) -> Vec<&Sense> {
        self.senses_of_kind(SenseKind::Related)
    }

    /// Human-readable label of a sense, e.g. `bank(2)`
    pub fn outward_facing_id(&self, sense_id: &str) -> Result<String> {
        Ok(self.sense(sense_id)?.get_outward_facing_id(&self.word))
    }

    /// Feature inheritance is transitive across the resemblance graph, so any
    /// change invalidates every sense.
    pub fn mark_all_insane(&mut self) {
        for sense in self.senses.values_mut() {
            sense.dirty = true;
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.mark_all_insane();
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Appends an annotator-created Related sense; returns its display id
    pub fn new_ghost_sense(&mut self) -> SenseId {
        let display_id = self.next_display_index.to_string();
        self.next_display_index += 1;
        let backend_id = format!("{}{}", VIRTUAL_BACKEND_PREFIX, self.next_virtual_id);
        self.next_virtual_id += 1;

        let mut sense = Sense::new(
            display_id.clone(),
            backend_id.clone(),
            None,
            Definition::Custom(CustomDefinition::blank()),
            VIRTUAL_LABEL_OPTIONS.to_vec(),
        )
        .relabelled(SenseKind::Related);
        sense.is_ghost = true;

        self.senses.insert(display_id.clone(), sense);
        self.order.push(display_id.clone());
        self.touch();

        info!(sense_id = %display_id, backend_id = %backend_id, "Virtual sense created");
        display_id
    }

    pub fn delete_ghost_sense(&mut self, sense_id: &str) -> Result<()> {
        match self.senses.get(sense_id) {
            None => return rejected("delete_ghost_sense", DomainError::SenseNotFound(sense_id.to_string())),
            Some(sense) if !sense.is_ghost => {
                return rejected("delete_ghost_sense", DomainError::NotAGhost(sense_id.to_string()))
            }
            Some(_) => {}
        }

        self.senses.remove(sense_id);
        self.order.retain(|id| id != sense_id);
        self.touch();

        info!(sense_id = %sense_id, "Virtual sense deleted");
        Ok(())
    }

    /// Replaces a sense with a literal-capable half `{id}A` and a fixed
    /// metaphorical half `{id}B` at the same position.
    pub fn split_mixed_sense(&mut self, sense_id: &str) -> Result<(SenseId, SenseId)> {
        let sense = match self.sense(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("split_mixed_sense", err),
        };
        if sense.is_mixed() {
            return rejected("split_mixed_sense", DomainError::AlreadyMixed(sense_id.to_string()));
        }
        if sense.is_ghost {
            return rejected(
                "split_mixed_sense",
                DomainError::GhostNotSplittable(sense_id.to_string()),
            );
        }

        let text = sense.definition.plain_text();
        let literal_id = format!("{}{}", sense_id, SPLIT_LITERAL_SUFFIX);
        let metaphorical_id = format!("{}{}", sense_id, SPLIT_METAPHORICAL_SUFFIX);

        let mut literal_half = Sense::new(
            literal_id.clone(),
            sense.backend_id.clone(),
            sense.dictionary_word.clone(),
            Definition::Custom(CustomDefinition::seeded(text.clone())),
            SPLIT_LITERAL_LABEL_OPTIONS.to_vec(),
        );
        literal_half.known = sense.known;
        literal_half.subcore = sense.subcore;
        literal_half.split = Some(SplitPair {
            role: SplitRole::Literal,
            base_id: sense_id.to_string(),
            partner_id: metaphorical_id.clone(),
            origin: sense.definition.clone(),
        });

        let mut metaphorical_half = Sense::new(
            metaphorical_id.clone(),
            sense.backend_id.clone(),
            sense.dictionary_word.clone(),
            Definition::Custom(CustomDefinition::seeded(text)),
            SPLIT_METAPHORICAL_LABEL_OPTIONS.to_vec(),
        )
        .relabelled(SenseKind::Metaphorical);
        metaphorical_half.known = sense.known;
        metaphorical_half.subcore = sense.subcore;
        metaphorical_half.split = Some(SplitPair {
            role: SplitRole::Metaphorical,
            base_id: sense_id.to_string(),
            partner_id: literal_id.clone(),
            origin: sense.definition.clone(),
        });
        if let Some(connection) = metaphorical_half.connection_mut() {
            connection.resembles = Some(literal_id.clone());
        }

        let position = self
            .order
            .iter()
            .position(|id| id == sense_id)
            .ok_or_else(|| DomainError::SenseNotFound(sense_id.to_string()))?;
        self.senses.remove(sense_id);
        self.senses.insert(literal_id.clone(), literal_half);
        self.senses.insert(metaphorical_id.clone(), metaphorical_half);
        self.order
            .splice(position..=position, [literal_id.clone(), metaphorical_id.clone()]);
        self.touch();

        info!(sense_id = %sense_id, literal = %literal_id, metaphorical = %metaphorical_id, "Sense split");
        Ok((literal_id, metaphorical_id))
    }

    /// Collapses a split pair (given either half) back into one unlabelled
    /// sense under the original id; returns that id.
    pub fn merge_mixed_sense(&mut self, sense_id: &str) -> Result<SenseId> {
        let sense = match self.sense(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("merge_mixed_sense", err),
        };
        let Some(pair) = sense.split.clone() else {
            return rejected("merge_mixed_sense", DomainError::NotMixed(sense_id.to_string()));
        };

        let (literal_id, metaphorical_id) = match pair.role {
            SplitRole::Literal => (sense_id.to_string(), pair.partner_id.clone()),
            SplitRole::Metaphorical => (pair.partner_id.clone(), sense_id.to_string()),
        };
        let literal_half = self
            .senses
            .get(&literal_id)
            .unwrap_or(sense);

        let mut merged = Sense::new(
            pair.base_id.clone(),
            literal_half.backend_id.clone(),
            literal_half.dictionary_word.clone(),
            pair.origin.clone(),
            DICTIONARY_LABEL_OPTIONS.to_vec(),
        );
        merged.known = literal_half.known;

        let position = self
            .order
            .iter()
            .position(|id| *id == literal_id || *id == metaphorical_id)
            .ok_or_else(|| DomainError::SenseNotFound(sense_id.to_string()))?;
        self.senses.remove(&literal_id);
        self.senses.remove(&metaphorical_id);
        self.order
            .retain(|id| *id != literal_id && *id != metaphorical_id);
        self.order.insert(position, pair.base_id.clone());
        self.senses.insert(pair.base_id.clone(), merged);
        self.touch();

        info!(sense_id = %pair.base_id, "Split pair merged");
        Ok(pair.base_id)
    }

    /// Reclassifies a sense, keeping its identity and content
    pub fn set_label(&mut self, sense_id: &str, kind: SenseKind) -> Result<()> {
        let sense = match self.sense(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_label", err),
        };
        if !sense.label_options.contains(&kind) {
            return rejected(
                "set_label",
                DomainError::LabelNotOffered {
                    sense_id: sense_id.to_string(),
                    label: kind.to_string(),
                },
            );
        }

        let relabelled = sense.relabelled(kind);
        self.senses.insert(sense_id.to_string(), relabelled);
        self.touch();

        info!(sense_id = %sense_id, label = %kind, "Sense relabelled");
        Ok(())
    }

    /// `set_label` taking the label as text; unknown labels are rejected
    /// before anything changes.
    pub fn set_label_str(&mut self, sense_id: &str, label: &str) -> Result<()> {
        match label.parse::<SenseKind>() {
            Ok(kind) => self.set_label(sense_id, kind),
            Err(err) => rejected("set_label", err),
        }
    }

    // ------------------------------------------------------------------
    // Per-sense edits
    // ------------------------------------------------------------------

    /// Points a Metaphorical/Related sense at another sense (or clears it).
    /// Invalid targets are accepted here and dropped on the next recompute.
    pub fn set_resembles(&mut self, sense_id: &str, target: Option<&str>) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_resembles", err),
        };
        if sense.fixed_target().is_some() {
            return rejected("set_resembles", DomainError::FixedConnection(sense_id.to_string()));
        }

        let changed = match &mut sense.role {
            SenseRole::Metaphorical(connection) => connection.retarget(target.map(str::to_string)),
            SenseRole::Related {
                connection,
                systematic,
            } => {
                let changed = connection.retarget(target.map(str::to_string));
                if changed {
                    *systematic = None;
                }
                changed
            }
            _ => {
                return rejected("set_resembles", DomainError::NotConnectable(sense_id.to_string()))
            }
        };

        if changed {
            self.touch();
            info!(sense_id = %sense_id, target = ?target, "Resemblance updated");
        }
        Ok(())
    }

    pub fn set_subcore(&mut self, sense_id: &str, value: bool) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_subcore", err),
        };
        if !sense.kind().is_some_and(|kind| kind.is_connected()) {
            return rejected(
                "set_subcore",
                DomainError::SubcoreNotApplicable(sense_id.to_string()),
            );
        }
        if sense.subcore != value {
            sense.subcore = value;
            self.touch();
        }
        Ok(())
    }

    pub fn set_systematic(&mut self, sense_id: &str, value: Option<bool>) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_systematic", err),
        };
        match &mut sense.role {
            SenseRole::Related { systematic, .. } => {
                if *systematic != value {
                    *systematic = value;
                    self.touch();
                }
                Ok(())
            }
            _ => rejected("set_systematic", DomainError::NotRelated(sense_id.to_string())),
        }
    }

    pub fn set_known(&mut self, sense_id: &str, known: bool) -> Result<()> {
        match self.sense_mut(sense_id) {
            Ok(sense) => sense.known = known,
            Err(err) => return rejected("set_known", err),
        }
        self.touch();
        Ok(())
    }

    pub fn any_known(&self) -> bool {
        self.senses.values().any(Sense::is_known)
    }

    pub fn make_all_senses_unknown(&mut self) {
        for sense in self.senses.values_mut() {
            sense.known = false;
        }
        self.touch();
    }

    /// Replaces the text of an annotator-written definition
    pub fn set_definition_text(&mut self, sense_id: &str, text: impl Into<String>) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_definition_text", err),
        };
        match &mut sense.definition {
            Definition::Custom(custom) => custom.set_text(text),
            Definition::Dictionary(_) => {
                return rejected(
                    "set_definition_text",
                    DomainError::DefinitionNotEditable(sense_id.to_string()),
                )
            }
        }
        self.touch();
        Ok(())
    }

    /// Declares a new, empty local feature; returns its id
    pub fn add_feature(&mut self, sense_id: &str) -> Result<FeatureId> {
        let index = self.next_feature_index;
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("add_feature", err),
        };
        let feature_id = format!("{}:{}", sense.display_id, index);
        sense.features.add(feature_id.clone());
        self.next_feature_index += 1;
        self.touch();
        Ok(feature_id)
    }

    pub fn set_feature_text(
        &mut self,
        sense_id: &str,
        feature_id: &str,
        text: impl Into<String>,
    ) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_feature_text", err),
        };
        if !sense.features.set_text(feature_id, text) {
            return rejected(
                "set_feature_text",
                DomainError::FeatureNotFound {
                    sense_id: sense_id.to_string(),
                    feature_id: feature_id.to_string(),
                },
            );
        }
        self.touch();
        Ok(())
    }

    pub fn delete_feature(&mut self, sense_id: &str, feature_id: &str) -> Result<()> {
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("delete_feature", err),
        };
        if !sense.features.remove(feature_id) {
            return rejected(
                "delete_feature",
                DomainError::FeatureNotFound {
                    sense_id: sense_id.to_string(),
                    feature_id: feature_id.to_string(),
                },
            );
        }
        self.touch();
        Ok(())
    }

    /// Labels an inherited feature as kept, lost or modified (or clears it)
    pub fn set_feature_label(
        &mut self,
        sense_id: &str,
        feature_id: &str,
        label: Option<FeatureLabel>,
    ) -> Result<()> {
        self.sanify();
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_feature_label", err),
        };
        let Some(connection) = sense.connection_mut() else {
            return rejected(
                "set_feature_label",
                DomainError::NotConnectable(sense_id.to_string()),
            );
        };
        match connection.feature_labels.get_mut(feature_id) {
            Some(slot) => *slot = label,
            None => {
                return rejected(
                    "set_feature_label",
                    DomainError::FeatureNotFound {
                        sense_id: sense_id.to_string(),
                        feature_id: feature_id.to_string(),
                    },
                )
            }
        }
        self.touch();
        Ok(())
    }

    /// Edits the replacement text of a feature labelled `modified`
    pub fn set_transformation(
        &mut self,
        sense_id: &str,
        feature_id: &str,
        text: impl Into<String>,
    ) -> Result<()> {
        self.sanify();
        let sense = match self.sense_mut(sense_id) {
            Ok(sense) => sense,
            Err(err) => return rejected("set_transformation", err),
        };
        let Some(connection) = sense.connection_mut() else {
            return rejected(
                "set_transformation",
                DomainError::NotConnectable(sense_id.to_string()),
            );
        };
        match connection.transformations.get_mut(feature_id) {
            Some(slot) => *slot = text.into(),
            None => {
                return rejected(
                    "set_transformation",
                    DomainError::FeatureNotFound {
                        sense_id: sense_id.to_string(),
                        feature_id: feature_id.to_string(),
                    },
                )
            }
        }
        self.touch();
        Ok(())
    }
}
