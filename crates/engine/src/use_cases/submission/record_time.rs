//! Record time use case - stores a dwell measurement for a participant.

use std::sync::Arc;

use ugclab_domain::ParticipantId;
use ugclab_shared::TimeRecordSubmission;

use super::SubmissionError;
use crate::infrastructure::ports::ParticipantStore;

pub struct RecordTimeRecord {
    store: Arc<dyn ParticipantStore>,
}

impl RecordTimeRecord {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        submission: TimeRecordSubmission,
    ) -> Result<ParticipantId, SubmissionError> {
        let (participant_id, record) = submission.validate()?;
        self.store
            .append_time_record(&participant_id, record)
            .await?;
        Ok(participant_id)
    }
}
