//! Record UGC use case - stores a reply or comment for a participant.

use std::sync::Arc;

use ugclab_domain::ParticipantId;
use ugclab_shared::UgcSubmission;

use super::SubmissionError;
use crate::infrastructure::ports::ParticipantStore;

/// Validates a UGC submission and appends it to the participant's record.
///
/// Nothing is written when validation fails.
pub struct RecordUgc {
    store: Arc<dyn ParticipantStore>,
}

impl RecordUgc {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, submission: UgcSubmission) -> Result<ParticipantId, SubmissionError> {
        let (participant_id, ugc) = submission.validate()?;
        self.store.append_ugc(&participant_id, ugc).await?;
        Ok(participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockParticipantStore, StoreError};
    use mockall::predicate::*;
    use ugclab_domain::{ArtifactId, ModeType};

    fn submission() -> UgcSubmission {
        UgcSubmission::new(
            &ParticipantId::new("P7"),
            "The glaze is lovely",
            &ArtifactId::new("vase"),
            ModeType::CommentBoard,
            1_700_000_000_000,
        )
    }

    #[tokio::test]
    async fn valid_submission_is_appended() {
        let mut store = MockParticipantStore::new();
        store
            .expect_append_ugc()
            .with(eq(ParticipantId::new("P7")), always())
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = RecordUgc::new(Arc::new(store));
        let id = use_case.execute(submission()).await.expect("recorded");

        assert_eq!(id.as_str(), "P7");
    }

    #[tokio::test]
    async fn missing_content_never_reaches_store() {
        let mut store = MockParticipantStore::new();
        store.expect_append_ugc().never();

        let mut body = submission();
        body.content = None;
        let result = RecordUgc::new(Arc::new(store)).execute(body).await;

        assert!(matches!(result, Err(SubmissionError::Invalid(_))));
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let mut store = MockParticipantStore::new();
        store
            .expect_append_ugc()
            .returning(|_, _| Err(StoreError::io("persist", "disk full")));

        let result = RecordUgc::new(Arc::new(store)).execute(submission()).await;

        assert!(matches!(result, Err(SubmissionError::Store(_))));
    }
}
