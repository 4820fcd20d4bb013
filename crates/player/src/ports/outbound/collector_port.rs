//! Collector Port - the remote research backend
//!
//! Every call is a single POST of a JSON body. Callers treat failures as
//! non-fatal; the port only reports them.

use async_trait::async_trait;
use ugclab_shared::{TimeRecordSubmission, UgcSubmission};

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// The request never got a response (connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The collector answered with a non-success status
    #[error("Collector returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectorPort: Send + Sync {
    async fn post_ugc(&self, submission: &UgcSubmission) -> Result<(), CollectorError>;

    async fn post_time_record(&self, record: &TimeRecordSubmission) -> Result<(), CollectorError>;
}
