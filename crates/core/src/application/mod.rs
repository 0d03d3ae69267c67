// Application Layer - Use Cases around an annotation session

pub mod activity_log;
pub mod command;
pub mod features;
pub mod queue;
pub mod session;
pub mod submit;

// Re-exports
pub use activity_log::ActivityLog;
pub use command::{ChangeListener, CommandOutcome, LemmaChange, LemmaCommand};
pub use queue::next_pending;
pub use session::AnnotationSession;

use crate::domain::{FeatureFrequencies, Submission};
use crate::error::Result;
use crate::port::{AnnotationStore, FeatureStore, LexicalResource, TimeProvider};
use std::sync::Arc;

/// Annotation Service - wires the ports into the use cases
pub struct AnnotationService {
    resource: Arc<dyn LexicalResource>,
    annotations: Arc<dyn AnnotationStore>,
    features: Arc<dyn FeatureStore>,
    time_provider: Arc<dyn TimeProvider>,
}

impl AnnotationService {
    pub fn new(
        resource: Arc<dyn LexicalResource>,
        annotations: Arc<dyn AnnotationStore>,
        features: Arc<dyn FeatureStore>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            resource,
            annotations,
            features,
            time_provider,
        }
    }

    /// Start annotating a `word:pos` lemma
    pub fn open(&self, lemma_key: &str) -> Result<AnnotationSession> {
        AnnotationSession::open(self.resource.as_ref(), lemma_key, self.time_provider.clone())
    }

    /// Validate and persist a session
    pub async fn submit(
        &self,
        session: &mut AnnotationSession,
        user_id: &str,
        queue_id: &str,
    ) -> Result<Submission> {
        submit::execute(
            self.annotations.as_ref(),
            self.features.as_ref(),
            session,
            user_id,
            queue_id,
        )
        .await
    }

    /// Next lemma of a queue the user has not submitted yet
    pub async fn next_lemma(
        &self,
        user_id: &str,
        queue_id: &str,
        queue: &[String],
    ) -> Result<Option<String>> {
        queue::next_lemma(self.annotations.as_ref(), user_id, queue_id, queue).await
    }

    /// Feature counts of a user, most frequent first via `suggestions()`
    pub async fn feature_frequencies(&self, user_id: &str) -> Result<FeatureFrequencies> {
        features::load_or_seed(self.features.as_ref(), user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gloss, ResourceBundle, SenseInfo};
    use crate::error::AppError;
    use crate::port::annotation_store::mocks::InMemoryAnnotationStore;
    use crate::port::feature_store::mocks::InMemoryFeatureStore;
    use crate::port::time_provider::mocks::SteppingClock;

    fn resource() -> ResourceBundle {
        let mut bundle = ResourceBundle::default();
        bundle
            .lemmas_to_senses
            .insert("moon:noun".to_string(), vec!["moon%1:17:01::".to_string()]);
        bundle.senses_to_info.insert(
            "moon%1:17:01::".to_string(),
            SenseInfo {
                word: "moon".to_string(),
                concept_id: "09376198-n".to_string(),
                synonyms: Vec::new(),
                examples: Vec::new(),
            },
        );
        bundle.concepts_to_definitions.insert(
            "09376198-n".to_string(),
            Gloss {
                string: "the natural satellite of the Earth".to_string(),
                annotations: Vec::new(),
            },
        );
        bundle
    }

    fn service(
        annotations: &InMemoryAnnotationStore,
        features: &InMemoryFeatureStore,
    ) -> AnnotationService {
        AnnotationService::new(
            Arc::new(resource()),
            Arc::new(annotations.clone()),
            Arc::new(features.clone()),
            Arc::new(SteppingClock::starting_at(1_000)),
        )
    }

    #[tokio::test]
    async fn test_open_annotate_submit() {
        let annotations = InMemoryAnnotationStore::new();
        let features = InMemoryFeatureStore::new([("is round", 3u64)].into_iter().collect());
        let service = service(&annotations, &features);
        let queue = vec!["moon:noun".to_string()];

        let mut session = service.open("moon:noun").unwrap();
        assert!(matches!(
            service.submit(&mut session, "ann1", "pilot").await,
            Err(AppError::IncompleteAnnotation(_))
        ));
        assert_eq!(annotations.submission_count(), 0);

        session
            .apply(LemmaCommand::SetLabel {
                sense: "1".to_string(),
                label: "core".to_string(),
            })
            .unwrap();
        let CommandOutcome::FeatureAdded(feature) = session
            .apply(LemmaCommand::AddFeature {
                sense: "1".to_string(),
            })
            .unwrap()
        else {
            panic!("expected a feature id");
        };
        session
            .apply(LemmaCommand::SetFeatureText {
                sense: "1".to_string(),
                feature,
                text: "is round".to_string(),
            })
            .unwrap();

        let submission = service.submit(&mut session, "ann1", "pilot").await.unwrap();
        assert_eq!(submission.senses.len(), 1);
        assert_eq!(annotations.submission_count(), 1);

        let log = annotations.activity_log("ann1", "pilot", "moon:noun").unwrap();
        assert_eq!(log.first().map(|entry| entry.time), Some(1_000));
        assert_eq!(log.last().map(|entry| entry.action.as_str()), Some("submit"));

        assert_eq!(
            service.feature_frequencies("ann1").await.unwrap().get("is round"),
            Some(4)
        );
        assert_eq!(service.next_lemma("ann1", "pilot", &queue).await.unwrap(), None);
        assert_eq!(
            service.next_lemma("ann2", "pilot", &queue).await.unwrap().as_deref(),
            Some("moon:noun")
        );
    }

    #[test]
    fn test_open_unknown_lemma() {
        let service = service(
            &InMemoryAnnotationStore::new(),
            &InMemoryFeatureStore::default(),
        );
        assert!(matches!(service.open("sun:noun"), Err(AppError::NotFound(_))));
    }
}
