// ChainNet Infrastructure - JSON File Adapters
// Implements: LexicalResource (via ResourceBundle), AnnotationStore, FeatureStore

mod annotation_store;
mod feature_store;
mod fs;
mod resource_loader;

pub use annotation_store::JsonAnnotationStore;
pub use feature_store::{JsonFeatureStore, DEFAULT_FEATURES_FILE};
pub use resource_loader::{load_queues, load_resource_bundle, QUEUES_FILE};
