//! Submission use cases - appending participant records.

use std::sync::Arc;

use ugclab_shared::ValidationError;

use crate::infrastructure::ports::StoreError;

mod record_time;
mod record_ugc;

pub use record_time::RecordTimeRecord;
pub use record_ugc::RecordUgc;

/// Container for submission use cases.
pub struct SubmissionUseCases {
    pub ugc: Arc<RecordUgc>,
    pub time: Arc<RecordTimeRecord>,
}

impl SubmissionUseCases {
    pub fn new(ugc: Arc<RecordUgc>, time: Arc<RecordTimeRecord>) -> Self {
        Self { ugc, time }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
