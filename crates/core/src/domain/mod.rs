// Domain Layer - Pure annotation logic and entities

pub mod activity;
pub mod constants;
pub mod definition;
pub mod error;
pub mod feature;
pub mod frequency;
mod inheritance;
pub mod issues;
pub mod label;
pub mod lemma;
pub mod resource;
pub mod sense;
pub mod snapshot;
mod validation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use activity::ActivityEntry;
pub use definition::{CustomDefinition, Definition, DictionaryDefinition, GlossSegment};
pub use error::DomainError;
pub use feature::{is_valid_feature, FeatureId, FeatureMap};
pub use frequency::FeatureFrequencies;
pub use issues::Issues;
pub use label::{FeatureLabel, SenseKind};
pub use lemma::Lemma;
pub use resource::{split_lemma_key, DictionarySense, Gloss, ResourceBundle, SenseInfo, Synonym};
pub use sense::{Connection, Sense, SenseId, SenseRole, SplitPair, SplitRole};
pub use snapshot::{LemmaSnapshot, SenseRecord, Submission};
