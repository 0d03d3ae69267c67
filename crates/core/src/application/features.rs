// Feature suggestions backed by per-user frequency counts

use crate::domain::FeatureFrequencies;
use crate::error::Result;
use crate::port::FeatureStore;
use tracing::info;

/// Counts of a user, seeding (and storing) the default set on first use
pub async fn load_or_seed(store: &dyn FeatureStore, user_id: &str) -> Result<FeatureFrequencies> {
    if let Some(frequencies) = store.load_features(user_id).await? {
        return Ok(frequencies);
    }

    let defaults = store.load_default_features().await?;
    store.save_features(user_id, &defaults).await?;
    info!(user = %user_id, features = defaults.len(), "Seeded default feature set");
    Ok(defaults)
}

/// Adds one submission's features to a user's counts and stores them
pub async fn record_features(
    store: &dyn FeatureStore,
    user_id: &str,
    features: &[String],
) -> Result<FeatureFrequencies> {
    let mut frequencies = load_or_seed(store, user_id).await?;
    frequencies.record(features);
    store.save_features(user_id, &frequencies).await?;
    Ok(frequencies)
}
