// Persistence-ready snapshot of a lemma's annotation

use super::feature::{FeatureId, FeatureMap};
use super::label::FeatureLabel;
use super::lemma::Lemma;
use super::sense::SenseRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted record of one sense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRecord {
    pub outward_id: String,
    pub is_known: bool,
    pub is_mixed: bool,
    pub is_virtual: bool,
    /// `core`, `association`, `metaphor`, or null while unlabelled
    pub label: Option<String>,
    pub definition: String,
    pub features: FeatureMap,
    pub is_conduit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_map: Option<BTreeMap<FeatureId, Option<FeatureLabel>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_modifications: Option<BTreeMap<FeatureId, String>>,
    pub position: usize,
}

/// Backend sense id -> record
pub type LemmaSnapshot = BTreeMap<String, SenseRecord>;

/// Everything persisted for one annotated lemma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub word_known: bool,
    pub senses: LemmaSnapshot,
    #[serde(default)]
    pub annotator_comments: String,
}

impl Lemma {
    /// Builds the persistence record of every sense, keyed by backend sense id
    pub fn get_data(&mut self) -> LemmaSnapshot {
        self.sanify();
        let mut snapshot = LemmaSnapshot::new();

        for (position, sense_id) in self.order.clone().iter().enumerate() {
            let Ok(features) = self.features(sense_id) else {
                continue;
            };
            let Some(sense) = self.senses.get(sense_id) else {
                continue;
            };

            let connected_to = sense
                .connection()
                .and_then(|connection| connection.resembles())
                .and_then(|target_id| self.senses.get(target_id))
                .map(|target| target.get_backend_sense_id());
            let (feature_map, feature_modifications) = match &sense.role {
                SenseRole::Metaphorical(connection) => (
                    Some(connection.feature_labels().clone()),
                    Some(connection.transformations().clone()),
                ),
                _ => (None, None),
            };

            let record = SenseRecord {
                outward_id: sense.display_id().to_string(),
                is_known: sense.is_known(),
                is_mixed: sense.is_mixed(),
                is_virtual: sense.is_ghost(),
                label: sense.kind().map(|kind| kind.export_name().to_string()),
                definition: sense.definition().plain_text(),
                features,
                is_conduit: sense.is_subcore(),
                connected_to,
                feature_map,
                feature_modifications,
                position,
            };
            snapshot.insert(sense.get_backend_sense_id(), record);
        }

        snapshot
    }
}
