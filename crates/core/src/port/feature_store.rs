// Feature Frequency Store Port (Interface)

use crate::domain::FeatureFrequencies;
use crate::error::Result;
use async_trait::async_trait;

/// Per-annotator feature counts used to rank suggestions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Counts of one user, `None` if the user has never submitted
    async fn load_features(&self, user_id: &str) -> Result<Option<FeatureFrequencies>>;

    /// Starter set handed to users without counts of their own
    async fn load_default_features(&self) -> Result<FeatureFrequencies>;

    async fn save_features(&self, user_id: &str, frequencies: &FeatureFrequencies) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory feature store with a fixed default set
    #[derive(Default, Clone)]
    pub struct InMemoryFeatureStore {
        defaults: FeatureFrequencies,
        users: Arc<Mutex<HashMap<String, FeatureFrequencies>>>,
    }

    impl InMemoryFeatureStore {
        pub fn new(defaults: FeatureFrequencies) -> Self {
            Self {
                defaults,
                users: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl FeatureStore for InMemoryFeatureStore {
        async fn load_features(&self, user_id: &str) -> Result<Option<FeatureFrequencies>> {
            Ok(self.users.lock().unwrap().get(user_id).cloned())
        }

        async fn load_default_features(&self) -> Result<FeatureFrequencies> {
            Ok(self.defaults.clone())
        }

        async fn save_features(&self, user_id: &str, frequencies: &FeatureFrequencies) -> Result<()> {
            self.users
                .lock()
                .unwrap()
                .insert(user_id.to_string(), frequencies.clone());
            Ok(())
        }
    }
}
