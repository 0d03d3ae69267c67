// Submit Use Case

use super::features::record_features;
use super::session::AnnotationSession;
use crate::domain::Submission;
use crate::error::Result;
use crate::port::{AnnotationStore, FeatureStore};
use tracing::info;

/// Execute submit use case
///
/// Validation happens before anything is written: an incomplete annotation
/// fails with `IncompleteAnnotation` and leaves both stores untouched.
///
/// # Arguments
///
/// * `annotations` - Submission and activity log store
/// * `features` - Per-user feature frequency store
/// * `session` - Session holding the lemma to submit
/// * `user_id` - Annotator
/// * `queue_id` - Queue the lemma belongs to
pub async fn execute(
    annotations: &dyn AnnotationStore,
    features: &dyn FeatureStore,
    session: &mut AnnotationSession,
    user_id: &str,
    queue_id: &str,
) -> Result<Submission> {
    let submission = session.prepare_submission()?;
    let lemma_key = session.lemma_key();

    annotations
        .save_submission(user_id, queue_id, &lemma_key, &submission)
        .await?;

    let feature_list = session.feature_list();
    record_features(features, user_id, &feature_list).await?;

    annotations
        .save_activity_log(user_id, queue_id, &lemma_key, session.activity_log())
        .await?;

    info!(
        user = %user_id,
        queue = %queue_id,
        lemma = %lemma_key,
        features = feature_list.len(),
        "Annotation submitted"
    );
    Ok(submission)
}
