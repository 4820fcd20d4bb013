//! Storage port for participant records.

use async_trait::async_trait;
use ugclab_domain::ParticipantId;
use ugclab_shared::{ParticipantData, TimeRecord, UgcContent};

use super::error::StoreError;

/// Append-only store of per-participant records.
///
/// Appends for an unknown participant create its record. Records keep the
/// order in which participants first appeared.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn append_ugc(
        &self,
        participant_id: &ParticipantId,
        ugc: UgcContent,
    ) -> Result<(), StoreError>;

    async fn append_time_record(
        &self,
        participant_id: &ParticipantId,
        record: TimeRecord,
    ) -> Result<(), StoreError>;

    async fn get(&self, participant_id: &ParticipantId)
        -> Result<Option<ParticipantData>, StoreError>;

    async fn list_all(&self) -> Result<Vec<ParticipantData>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
