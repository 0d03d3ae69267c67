// Sense Domain Model
//
// A sense is a tagged variant: identity and annotation state shared by every
// kind live on `Sense`, kind-specific state lives in `SenseRole`.

use super::constants::{
    DICTIONARY_BACKEND_PREFIX, SPLIT_LITERAL_PREFIX, SPLIT_METAPHORICAL_PREFIX,
};
use super::definition::Definition;
use super::feature::{FeatureId, FeatureMap, LocalFeatures};
use super::label::{FeatureLabel, SenseKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display id, unique within one lemma (defines row identity)
pub type SenseId = String;

/// Which half of a split pair a sense is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRole {
    /// Literal-capable half (`{id}A`)
    Literal,
    /// Fixed metaphorical half (`{id}B`), always resembling its partner
    Metaphorical,
}

/// Membership in a split pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPair {
    pub role: SplitRole,
    /// Display id of the sense that was split
    pub base_id: SenseId,
    /// Display id of the other half
    pub partner_id: SenseId,
    /// Definition of the sense before it was split (restored on merge)
    pub origin: Definition,
}

/// Resemblance edge plus feature inheritance bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub(super) resembles: Option<SenseId>,
    pub(super) feature_labels: BTreeMap<FeatureId, Option<FeatureLabel>>,
    pub(super) transformations: BTreeMap<FeatureId, String>,
}

impl Connection {
    pub fn resembles(&self) -> Option<&str> {
        self.resembles.as_deref()
    }

    pub fn feature_labels(&self) -> &BTreeMap<FeatureId, Option<FeatureLabel>> {
        &self.feature_labels
    }

    pub fn transformations(&self) -> &BTreeMap<FeatureId, String> {
        &self.transformations
    }

    pub(super) fn reset(&mut self) {
        self.resembles = None;
        self.feature_labels.clear();
        self.transformations.clear();
    }

    /// Points the edge at a new target; labels belong to the old target and are dropped
    pub(super) fn retarget(&mut self, target: Option<SenseId>) -> bool {
        if self.resembles == target {
            return false;
        }
        self.reset();
        self.resembles = target;
        true
    }

    /// Aligns labels and transformations with the live feature set of the target
    pub(super) fn track(&mut self, target_features: &FeatureMap) {
        for feature_id in target_features.keys() {
            self.feature_labels.entry(feature_id.clone()).or_insert(None);
        }
        self.feature_labels
            .retain(|feature_id, _| target_features.contains_key(feature_id));

        let labels = &self.feature_labels;
        self.transformations.retain(|feature_id, _| {
            matches!(labels.get(feature_id), Some(Some(FeatureLabel::Modified)))
        });

        for (feature_id, label) in &self.feature_labels {
            if *label == Some(FeatureLabel::Modified) && !self.transformations.contains_key(feature_id) {
                let seed = target_features.get(feature_id).cloned().unwrap_or_default();
                self.transformations.insert(feature_id.clone(), seed);
            }
        }
    }
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SenseRole {
    /// No classification assigned yet
    Unlabelled,
    Literal,
    Metaphorical(Connection),
    Related {
        connection: Connection,
        /// Regular/irregular flag; kept but not consulted by validation or export
        systematic: Option<bool>,
    },
}

impl SenseRole {
    fn fresh(kind: SenseKind) -> Self {
        match kind {
            SenseKind::Literal => SenseRole::Literal,
            SenseKind::Metaphorical => SenseRole::Metaphorical(Connection::default()),
            SenseKind::Related => SenseRole::Related {
                connection: Connection::default(),
                systematic: None,
            },
        }
    }

    pub fn kind(&self) -> Option<SenseKind> {
        match self {
            SenseRole::Unlabelled => None,
            SenseRole::Literal => Some(SenseKind::Literal),
            SenseRole::Metaphorical(_) => Some(SenseKind::Metaphorical),
            SenseRole::Related { .. } => Some(SenseKind::Related),
        }
    }
}

/// One sense of a lemma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub(super) display_id: SenseId,
    pub(super) backend_id: String,
    /// Headword of the dictionary entry this sense came from
    pub(super) dictionary_word: Option<String>,
    pub(super) known: bool,
    pub(super) is_ghost: bool,
    pub(super) split: Option<SplitPair>,
    /// Conduit flag: this non-literal sense may itself be resembled
    pub(super) subcore: bool,
    /// Derived state must be recomputed before the next read
    pub(super) dirty: bool,
    pub(super) features: LocalFeatures,
    pub(super) definition: Definition,
    pub(super) label_options: Vec<SenseKind>,
    pub(super) role: SenseRole,
}

impl Sense {
    pub(super) fn new(
        display_id: impl Into<String>,
        backend_id: impl Into<String>,
        dictionary_word: Option<String>,
        definition: Definition,
        label_options: Vec<SenseKind>,
    ) -> Self {
        Self {
            display_id: display_id.into(),
            backend_id: backend_id.into(),
            dictionary_word,
            known: true,
            is_ghost: false,
            split: None,
            subcore: false,
            dirty: true,
            features: LocalFeatures::new(),
            definition,
            label_options,
            role: SenseRole::Unlabelled,
        }
    }

    /// Copy of this sense under another classification.
    ///
    /// Identity, definition, local features and flags carry over. The
    /// connection survives only when the kind does not change; becoming
    /// Literal drops the conduit flag.
    pub(super) fn relabelled(&self, kind: SenseKind) -> Self {
        let role = if self.kind() == Some(kind) {
            self.role.clone()
        } else {
            SenseRole::fresh(kind)
        };
        Self {
            subcore: self.subcore && kind != SenseKind::Literal,
            dirty: true,
            role,
            ..self.clone()
        }
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    pub fn backend_id(&self) -> &str {
        &self.backend_id
    }

    /// Persistence key; split halves are told apart by an `A_`/`B_` prefix
    pub fn get_backend_sense_id(&self) -> String {
        if self.is_mixed() {
            let prefix = if self.kind() == Some(SenseKind::Metaphorical) {
                SPLIT_METAPHORICAL_PREFIX
            } else {
                SPLIT_LITERAL_PREFIX
            };
            format!("{}{}", prefix, self.backend_id)
        } else {
            self.backend_id.clone()
        }
    }

    /// Human-readable label, e.g. `bank(2)`
    pub fn get_outward_facing_id(&self, lemma_word: &str) -> String {
        match &self.dictionary_word {
            Some(word) if self.backend_id.starts_with(DICTIONARY_BACKEND_PREFIX) => {
                format!("{}({})", word, self.display_id)
            }
            _ => format!("{}({})", lemma_word, self.display_id),
        }
    }

    pub fn kind(&self) -> Option<SenseKind> {
        self.role.kind()
    }

    pub fn role(&self) -> &SenseRole {
        &self.role
    }

    pub fn is_known(&self) -> bool {
        self.known
    }

    pub fn is_mixed(&self) -> bool {
        self.split.is_some()
    }

    pub fn split(&self) -> Option<&SplitPair> {
        self.split.as_ref()
    }

    pub fn split_role(&self) -> Option<SplitRole> {
        self.split.as_ref().map(|pair| pair.role)
    }

    pub fn is_ghost(&self) -> bool {
        self.is_ghost
    }

    pub fn is_subcore(&self) -> bool {
        self.subcore
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn label_options(&self) -> &[SenseKind] {
        &self.label_options
    }

    pub fn local_features(&self) -> &LocalFeatures {
        &self.features
    }

    /// Resemblance state, for Metaphorical and Related senses.
    ///
    /// Reflects the last recompute; go through `Lemma` to read it fresh.
    pub fn connection(&self) -> Option<&Connection> {
        match &self.role {
            SenseRole::Metaphorical(connection) | SenseRole::Related { connection, .. } => {
                Some(connection)
            }
            _ => None,
        }
    }

    pub(super) fn connection_mut(&mut self) -> Option<&mut Connection> {
        match &mut self.role {
            SenseRole::Metaphorical(connection) | SenseRole::Related { connection, .. } => {
                Some(connection)
            }
            _ => None,
        }
    }

    pub fn systematic(&self) -> Option<bool> {
        match &self.role {
            SenseRole::Related { systematic, .. } => *systematic,
            _ => None,
        }
    }

    /// The split partner this sense is bound to, if its edge is fixed
    pub fn fixed_target(&self) -> Option<&str> {
        match &self.split {
            Some(pair) if pair.role == SplitRole::Metaphorical => Some(pair.partner_id.as_str()),
            _ => None,
        }
    }

    /// Whether this sense may resemble `target`
    pub fn accepts_connection_to(&self, target: &Sense) -> bool {
        let distinct = target.display_id != self.display_id;
        match (self.kind(), target.kind()) {
            (Some(SenseKind::Metaphorical), Some(SenseKind::Literal | SenseKind::Related)) => true,
            (Some(SenseKind::Metaphorical), Some(SenseKind::Metaphorical)) => {
                target.subcore && distinct
            }
            (Some(SenseKind::Related), Some(SenseKind::Literal)) => true,
            (Some(SenseKind::Related), Some(SenseKind::Metaphorical | SenseKind::Related)) => {
                target.subcore && distinct
            }
            _ => false,
        }
    }
}
