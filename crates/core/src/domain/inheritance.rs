//! Feature inheritance along resemblance edges.
//!
//! Derived state (validated edges, feature labels, transformation seeds) is
//! recomputed lazily: mutations only set the dirty bit, and every read that
//! depends on derived state runs [`Lemma::sanify`] first. Recomputing a
//! clean lemma is a no-op, so repeated reads are idempotent.

use super::constants::MODIFIED_FEATURE_SUFFIX;
use super::error::Result;
use super::feature::{FeatureId, FeatureMap};
use super::label::{FeatureLabel, SenseKind};
use super::lemma::Lemma;
use super::sense::{SenseId, SenseRole};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

impl Lemma {
    /// Recomputes derived state of every dirty sense
    pub fn sanify(&mut self) {
        let order = self.order.clone();
        for sense_id in &order {
            self.sanify_sense(sense_id);
        }
    }

    /// Recomputes one sense, resolving the sense it resembles first.
    ///
    /// The dirty bit is cleared before recursing, so a cycle of conduit
    /// senses terminates and reads the stored state of the sense already
    /// being recomputed.
    fn sanify_sense(&mut self, sense_id: &str) {
        let Some(sense) = self.senses.get_mut(sense_id) else {
            return;
        };
        if !sense.dirty {
            return;
        }
        sense.dirty = false;

        let Some(sense) = self.senses.get(sense_id) else {
            return;
        };
        let Some(connection) = sense.connection() else {
            return;
        };

        let target = match sense.fixed_target() {
            Some(partner) => Some(partner.to_string()).filter(|id| self.order.contains(id)),
            None => connection.resembles().and_then(|target_id| {
                let valid = self.order.iter().any(|id| id == target_id)
                    && self
                        .senses
                        .get(target_id)
                        .is_some_and(|target| sense.accepts_connection_to(target));
                valid.then(|| target_id.to_string())
            }),
        };
        let stale = connection.resembles().is_some() && target.is_none();

        match target {
            Some(target_id) => {
                self.sanify_sense(&target_id);
                let target_features = self.effective_features(&target_id, &mut HashSet::new());
                if let Some(connection) = self.senses.get_mut(sense_id).and_then(|s| s.connection_mut()) {
                    connection.resembles = Some(target_id);
                    connection.track(&target_features);
                }
                debug!(sense_id = %sense_id, features = target_features.len(), "Sense sanified");
            }
            None => {
                if let Some(sense) = self.senses.get_mut(sense_id) {
                    if let Some(connection) = sense.connection_mut() {
                        connection.reset();
                    }
                    if stale {
                        if let SenseRole::Related { systematic, .. } = &mut sense.role {
                            *systematic = None;
                        }
                    }
                }
                if stale {
                    warn!(sense_id = %sense_id, "Dropped invalid resemblance");
                }
            }
        }
    }

    /// Effective feature view from stored state; `visiting` guards cycles
    pub(super) fn effective_features(&self, sense_id: &str, visiting: &mut HashSet<SenseId>) -> FeatureMap {
        let Some(sense) = self.senses.get(sense_id) else {
            return FeatureMap::new();
        };
        if !visiting.insert(sense_id.to_string()) {
            return sense.features.entries().clone();
        }

        let mut features = FeatureMap::new();
        if let SenseRole::Metaphorical(connection) = &sense.role {
            if let Some(target_id) = connection.resembles() {
                let inherited = self.effective_features(target_id, visiting);
                for (feature_id, text) in inherited {
                    match connection.feature_labels.get(&feature_id) {
                        Some(Some(FeatureLabel::Kept)) => {
                            features.insert(feature_id, text);
                        }
                        Some(Some(FeatureLabel::Modified)) => {
                            let transformed = connection
                                .transformations
                                .get(&feature_id)
                                .cloned()
                                .unwrap_or_default();
                            features.insert(
                                format!("{}{}", feature_id, MODIFIED_FEATURE_SUFFIX),
                                transformed,
                            );
                        }
                        _ => {}
                    }
                }
            }
        }
        for (feature_id, text) in sense.features.entries() {
            features.insert(feature_id.clone(), text.clone());
        }

        visiting.remove(sense_id);
        features
    }

    /// Effective features of a sense.
    ///
    /// Metaphorical senses see `kept` features of the resembled sense under
    /// their own id, `modified` ones as `{id}(M)` with the transformed text,
    /// plus their local features. `lost` features are left out. Every other
    /// kind sees its local features.
    pub fn features(&mut self, sense_id: &str) -> Result<FeatureMap> {
        self.sanify();
        self.sense(sense_id)?;
        Ok(self.effective_features(sense_id, &mut HashSet::new()))
    }

    /// Text of one effective feature
    pub fn feature(&mut self, sense_id: &str, feature_id: &str) -> Result<Option<String>> {
        Ok(self.features(sense_id)?.remove(feature_id))
    }

    /// Sense currently resembled, after dropping invalid or stale edges
    pub fn resembles(&mut self, sense_id: &str) -> Result<Option<SenseId>> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        Ok(sense
            .connection()
            .and_then(|connection| connection.resembles().map(str::to_string)))
    }

    pub fn feature_labels(
        &mut self,
        sense_id: &str,
    ) -> Result<BTreeMap<FeatureId, Option<FeatureLabel>>> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        Ok(sense
            .connection()
            .map(|connection| connection.feature_labels().clone())
            .unwrap_or_default())
    }

    pub fn feature_label(&mut self, sense_id: &str, feature_id: &str) -> Result<Option<FeatureLabel>> {
        Ok(self.feature_labels(sense_id)?.get(feature_id).copied().flatten())
    }

    pub fn transformations(&mut self, sense_id: &str) -> Result<BTreeMap<FeatureId, String>> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        Ok(sense
            .connection()
            .map(|connection| connection.transformations().clone())
            .unwrap_or_default())
    }

    pub fn is_subcore(&mut self, sense_id: &str) -> Result<bool> {
        self.sanify();
        Ok(self.sense(sense_id)?.is_subcore())
    }

    pub fn systematic(&mut self, sense_id: &str) -> Result<Option<bool>> {
        self.sanify();
        Ok(self.sense(sense_id)?.systematic())
    }

    /// Feature strings one sense contributes to corpus-wide frequency counts.
    ///
    /// Metaphorical senses contribute only their transformation texts, not
    /// kept or locally declared features.
    pub fn sense_feature_list(&mut self, sense_id: &str) -> Result<Vec<String>> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        Ok(match &sense.role {
            SenseRole::Metaphorical(connection) => {
                connection.transformations().values().cloned().collect()
            }
            _ => sense.features.texts().map(str::to_string).collect(),
        })
    }

    /// Concatenation (not de-duplicated) of every sense's feature list
    pub fn get_feature_list(&mut self) -> Vec<String> {
        self.sanify();
        let order = self.order.clone();
        order
            .iter()
            .filter_map(|sense_id| self.sense_feature_list(sense_id).ok())
            .flatten()
            .collect()
    }

    /// Senses the given sense could resemble right now, in row order
    pub fn connection_candidates(&mut self, sense_id: &str) -> Result<Vec<SenseId>> {
        self.sanify();
        let sense = self.sense(sense_id)?;
        Ok(self
            .all_senses()
            .into_iter()
            .filter(|candidate| sense.accepts_connection_to(candidate))
            .map(|candidate| candidate.display_id().to_string())
            .collect())
    }

    /// Senses whose resemblance edge points at `sense_id`
    pub fn senses_connected_to(&mut self, sense_id: &str) -> Vec<SenseId> {
        self.sanify();
        self.all_senses()
            .into_iter()
            .filter(|sense| {
                sense
                    .connection()
                    .and_then(|connection| connection.resembles())
                    == Some(sense_id)
            })
            .map(|sense| sense.display_id().to_string())
            .collect()
    }

    /// Whether any Metaphorical sense resembles `sense_id`
    pub fn has_metaphorical_dependents(&mut self, sense_id: &str) -> bool {
        let dependents = self.senses_connected_to(sense_id);
        dependents.iter().any(|id| {
            self.get_sense(id)
                .is_some_and(|sense| sense.kind() == Some(SenseKind::Metaphorical))
        })
    }
}
