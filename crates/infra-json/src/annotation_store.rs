// JSON AnnotationStore Implementation
//
// Layout: {root}/{user}/queues/{queue}/{lemma}.json with the activity log in
// {lemma}.logs.json next to it. Path components are escaped.

use crate::fs::{decode_component, encode_component, map_io_error, read_json_opt, write_json};
use async_trait::async_trait;
use chainnet_core::domain::{ActivityEntry, Submission};
use chainnet_core::error::Result;
use chainnet_core::port::AnnotationStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

const SUBMISSION_EXT: &str = ".json";
const LOG_EXT: &str = ".logs.json";

pub struct JsonAnnotationStore {
    root: PathBuf,
}

impl JsonAnnotationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn queue_dir(&self, user_id: &str, queue_id: &str) -> PathBuf {
        self.root
            .join(encode_component(user_id))
            .join("queues")
            .join(encode_component(queue_id))
    }

    fn submission_path(&self, user_id: &str, queue_id: &str, lemma_key: &str) -> PathBuf {
        self.queue_dir(user_id, queue_id)
            .join(format!("{}{}", encode_component(lemma_key), SUBMISSION_EXT))
    }

    fn log_path(&self, user_id: &str, queue_id: &str, lemma_key: &str) -> PathBuf {
        self.queue_dir(user_id, queue_id)
            .join(format!("{}{}", encode_component(lemma_key), LOG_EXT))
    }

    /// Stored activity log of one lemma
    pub async fn load_activity_log(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
    ) -> Result<Option<Vec<ActivityEntry>>> {
        read_json_opt(&self.log_path(user_id, queue_id, lemma_key)).await
    }
}

#[async_trait]
impl AnnotationStore for JsonAnnotationStore {
    async fn save_submission(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
        submission: &Submission,
    ) -> Result<()> {
        let path = self.submission_path(user_id, queue_id, lemma_key);
        write_json(&path, submission).await?;
        info!(user = %user_id, queue = %queue_id, lemma = %lemma_key, path = %path.display(), "Submission saved");
        Ok(())
    }

    async fn load_submission(
        &self,
        user_id: &str,
        queue_id: &str,
        lemma_key: &str,
    ) -> Result<Option<Submission>> {
        read_json_opt(&self.submission_path(user_id, queue_id, lemma_key)).await
    }

    async fn submitted_lemmas(&self, user_id: &str, queue_id: &str) -> Result<Vec<String>> {
        let dir = self.queue_dir(user_id, queue_id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(map_io_error(&dir, err)),
        };

        let mut lemmas = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| map_io_error(&dir, e))? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(LOG_EXT) {
                continue;
            }
            if let Some(stem) = name.strip_suffix(SUBMISSION_EXT) {
                lemmas.push(decode_component(stem));
            }
        }
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
        write_json(&self.log_path(user_id, queue_id, lemma_key), entries).await
    }
}
