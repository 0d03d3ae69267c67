// Annotation Store Port (Interface)

use crate::domain::{ActivityEntry, Submission};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence of finished annotations, keyed by user, queue and lemma
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Store (or overwrite) the submission of one lemma
    async fn save_submission(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
        submission: &Submission,
    ) -> Result<()>;

    /// Load a previously stored submission
    async fn load_submission(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
    ) -> Result<Option<Submission>>;

    /// Lemma keys already submitted in a queue
    async fn submitted_lemmas(&self, user_id: &str, queue_id: &str) -> Result<Vec<String>>;

    /// Store the activity log recorded while annotating one lemma
    async fn save_activity_log(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
        entries: &[ActivityEntry],
    ) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Key = (String, String, String);

    fn key(user_id: &str, queue_id: &str, lemma_key: &str) -> Key {
        (user_id.to_string(), queue_id.to_string(), lemma_key.to_string())
    }

    /// In-memory annotation store
    #[derive(Default, Clone)]
    pub struct InMemoryAnnotationStore {
        submissions: Arc<Mutex<HashMap<Key, Submission>>>,
        logs: Arc<Mutex<HashMap<Key, Vec<ActivityEntry>>>>,
    }

    impl InMemoryAnnotationStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn activity_log(
            &self,
            user_id: &str,
            queue_id: &str,
            lemma_key: &str,
        ) -> Option<Vec<ActivityEntry>> {
            self.logs
                .lock()
                .unwrap()
                .get(&key(user_id, queue_id, lemma_key))
                .cloned()
        }

        pub fn submission_count(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AnnotationStore for InMemoryAnnotationStore {
        async fn save_submission(
            &self,
            user_id: &str,
            queue_id: &str,
            lemma_key: &str,
            submission: &Submission,
        ) -> Result<()> {
            self.submissions
                .lock()
                .unwrap()
                .insert(key(user_id, queue_id, lemma_key), submission.clone());
            Ok(())
        }

        async fn load_submission(
            &self,
            user_id: &str,
            queue_id: &str,
            lemma_key: &str,
        ) -> Result<Option<Submission>> {
            Ok(self
                .submissions
                .lock()
                .unwrap()
                .get(&key(user_id, queue_id, lemma_key))
                .cloned())
        }

        async fn submitted_lemmas(&self, user_id: &str, queue_id: &str) -> Result<Vec<String>> {
            let mut lemmas: Vec<String> = self
                .submissions
                .lock()
                .unwrap()
                .keys()
                .filter(|(user, queue, _)| user == user_id && queue == queue_id)
                .map(|(_, _, lemma)| lemma.clone())
                .collect();
            lemmas.sort();
            Ok(lemmas)
        }

        async fn save_activity_log(
            &self,
            user_id: &str,
            queue_id: &str,
            lemma_key: &str,
            entries: &[ActivityEntry],
        ) -> Result<()> {
            self.logs
                .lock()
                .unwrap()
                .insert(key(user_id, queue_id, lemma_key), entries.to_vec());
            Ok(())
        }
    }
}
