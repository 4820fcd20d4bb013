//! JSON-file participant store.
//!
//! All participants live in memory and the whole set is rewritten to
//! `participants.json` after every append. A single mutex covers both the
//! in-memory update and the file write, so concurrent requests cannot
//! interleave partial rewrites. Writes go to a temp file that is renamed
//! over the target.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use ugclab_domain::ParticipantId;
use ugclab_shared::{ParticipantData, TimeRecord, UgcContent};

use crate::infrastructure::ports::{ParticipantStore, StoreError};

pub const STORE_FILE_NAME: &str = "participants.json";

pub struct JsonFileStore {
    path: PathBuf,
    participants: Mutex<Vec<ParticipantData>>,
}

impl JsonFileStore {
    /// Opens the store in `data_dir`, creating the directory and an empty
    /// file when missing. An unreadable or malformed file is an error.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| StoreError::io("create data dir", e))?;
        let path = data_dir.join(STORE_FILE_NAME);

        let participants = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let participants: Vec<ParticipantData> = serde_json::from_str(&content)?;
                tracing::info!(
                    path = %path.display(),
                    participants = participants.len(),
                    "Loaded participant records"
                );
                participants
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No existing data file, starting fresh");
                write_atomically(&path, &[]).await?;
                Vec::new()
            }
            Err(e) => return Err(StoreError::io("read store", e)),
        };

        Ok(Self {
            path,
            participants: Mutex::new(participants),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `update` to the participant's record and persists. On a
    /// failed write the in-memory state is rolled back.
    async fn append_with(
        &self,
        participant_id: &ParticipantId,
        update: impl FnOnce(&mut ParticipantData),
    ) -> Result<(), StoreError> {
        let mut participants = self.participants.lock().await;
        let before = participants.clone();

        let index = match participants
            .iter()
            .position(|p| &p.participant_id == participant_id)
        {
            Some(index) => index,
            None => {
                participants.push(ParticipantData::new(participant_id.clone()));
                participants.len() - 1
            }
        };
        if let Some(record) = participants.get_mut(index) {
            update(record);
        }

        if let Err(e) = write_atomically(&self.path, &participants).await {
            *participants = before;
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ParticipantStore for JsonFileStore {
    async fn append_ugc(
        &self,
        participant_id: &ParticipantId,
        ugc: UgcContent,
    ) -> Result<(), StoreError> {
        let mode = ugc.mode.clone();
        let artifact_id = ugc.artifact_id.clone();
        self.append_with(participant_id, |record| record.ugc_contents.push(ugc))
            .await?;
        tracing::info!(
            participant_id = %participant_id,
            mode = %mode,
            artifact_id = %artifact_id,
            "Added UGC"
        );
        Ok(())
    }

    async fn append_time_record(
        &self,
        participant_id: &ParticipantId,
        record: TimeRecord,
    ) -> Result<(), StoreError> {
        let mode = record.mode.clone();
        let duration_ms = record.duration_ms;
        self.append_with(participant_id, |data| data.time_records.push(record))
            .await?;
        tracing::info!(
            participant_id = %participant_id,
            mode = ?mode,
            duration_ms,
            "Added time record"
        );
        Ok(())
    }

    async fn get(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantData>, StoreError> {
        let participants = self.participants.lock().await;
        Ok(participants
            .iter()
            .find(|p| &p.participant_id == participant_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<ParticipantData>, StoreError> {
        Ok(self.participants.lock().await.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.participants.lock().await.len())
    }
}

/// Reads a participants file without opening a store.
pub async fn read_records(path: &Path) -> Result<Vec<ParticipantData>, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io("read store", e))?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_atomically(path: &Path, participants: &[ParticipantData]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(participants)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json)
        .await
        .map_err(|e| StoreError::io("write temp file", e))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| StoreError::io("rename temp file", e))?;
    Ok(())
}
