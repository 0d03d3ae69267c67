// Port Layer - Interfaces for external dependencies

pub mod annotation_store;
pub mod feature_store;
pub mod lexical_resource;
pub mod time_provider;

// Re-exports
pub use annotation_store::AnnotationStore;
pub use feature_store::FeatureStore;
pub use lexical_resource::LexicalResource;
pub use time_provider::{SystemTimeProvider, TimeProvider};
