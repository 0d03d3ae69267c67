// JSON FeatureStore Implementation
//
// Layout: {root}/{user}/features.json; the default set is read from a
// separate file (usually `default_features.json` in the resource directory).

use crate::fs::{encode_component, read_json_opt, write_json};
use async_trait::async_trait;
use chainnet_core::domain::FeatureFrequencies;
use chainnet_core::error::Result;
use chainnet_core::port::FeatureStore;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DEFAULT_FEATURES_FILE: &str = "default_features.json";
const FEATURES_FILE: &str = "features.json";

pub struct JsonFeatureStore {
    root: PathBuf,
    defaults_path: Option<PathBuf>,
}

impl JsonFeatureStore {
    pub fn new(root: impl Into<PathBuf>, defaults_path: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            defaults_path,
        }
    }

    fn user_path(&self, user_id: &str) -> PathBuf {
        self.root.join(encode_component(user_id)).join(FEATURES_FILE)
    }
}

#[async_trait]
impl FeatureStore for JsonFeatureStore {
    async fn load_features(&self, user_id: &str) -> Result<Option<FeatureFrequencies>> {
        read_json_opt(&self.user_path(user_id)).await
    }

    async fn load_default_features(&self) -> Result<FeatureFrequencies> {
        let Some(path) = &self.defaults_path else {
            return Ok(FeatureFrequencies::new());
        };
        match read_json_opt(path).await? {
            Some(defaults) => Ok(defaults),
            None => {
                warn!(path = %path.display(), "Default feature set not found, starting empty");
                Ok(FeatureFrequencies::new())
            }
        }
    }

    async fn save_features(&self, user_id: &str, frequencies: &FeatureFrequencies) -> Result<()> {
        write_json(&self.user_path(user_id), frequencies).await?;
        debug!(user = %user_id, features = frequencies.len(), "Feature counts saved");
        Ok(())
    }
}
