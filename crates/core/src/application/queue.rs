// Lemma queue progression

use crate::error::Result;
use crate::port::AnnotationStore;

/// Index of the first lemma in `queue` not yet in `done`
pub fn next_pending(queue: &[String], done: &[String]) -> Option<usize> {
    queue.iter().position(|lemma_key| !done.contains(lemma_key))
}

/// Next lemma a user still has to annotate in a queue, `None` when finished
pub async fn next_lemma(
    store: &dyn AnnotationStore,
    user_id: &str,
    queue_id: &str,
    queue: &[String],
) -> Result<Option<String>> {
    let done = store.submitted_lemmas(user_id, queue_id).await?;
    Ok(next_pending(queue, &done).map(|index| queue[index].clone()))
}
