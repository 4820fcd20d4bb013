//! Request bodies accepted by the collector
//!
//! Every field is optional on the wire so that a missing field surfaces as a
//! validation error with a useful message instead of a parse failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ugclab_domain::{common::none_if_blank, ArtifactId, ModeType, ParticipantId};

use crate::{TimeRecord, UgcContent};

const UGC_FIELDS: &str = "participantId, content, artifactId, mode, timestamp";
const TIME_FIELDS: &str = "participantId, exitTime, durationMs";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),
}

/// `POST /data/ugc`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl UgcSubmission {
    pub fn new(
        participant_id: &ParticipantId,
        content: impl Into<String>,
        artifact_id: &ArtifactId,
        mode: ModeType,
        timestamp: i64,
    ) -> Self {
        Self {
            participant_id: Some(participant_id.to_string()),
            content: Some(content.into()),
            artifact_id: Some(artifact_id.to_string()),
            mode: Some(mode.as_str().to_string()),
            timestamp: Some(timestamp),
        }
    }

    /// Checks required fields. Empty strings and a zero timestamp count as missing.
    pub fn validate(self) -> Result<(ParticipantId, UgcContent), ValidationError> {
        let missing = ValidationError::MissingFields(UGC_FIELDS);
        let participant_id = self.participant_id.filter(|v| !v.is_empty());
        let content = self.content.filter(|v| !v.is_empty());
        let artifact_id = self.artifact_id.filter(|v| !v.is_empty());
        let mode = self.mode.filter(|v| !v.is_empty());
        let timestamp = self.timestamp.filter(|t| *t != 0);

        let (Some(participant_id), Some(content), Some(artifact_id), Some(mode), Some(timestamp)) =
            (participant_id, content, artifact_id, mode, timestamp)
        else {
            return Err(missing);
        };

        Ok((
            ParticipantId::new(participant_id),
            UgcContent {
                content,
                artifact_id: ArtifactId::new(artifact_id),
                mode,
                timestamp,
            },
        ))
    }
}

/// `POST /data/time`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecordSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl TimeRecordSubmission {
    pub fn new(
        participant_id: &ParticipantId,
        mode: Option<ModeType>,
        artifact_id: Option<&ArtifactId>,
        exit_time: i64,
        duration_ms: u64,
    ) -> Self {
        Self {
            participant_id: Some(participant_id.to_string()),
            mode: mode.map(|m| m.as_str().to_string()),
            artifact_id: artifact_id.map(ToString::to_string),
            exit_time: Some(exit_time),
            duration_ms: Some(duration_ms),
        }
    }

    /// Only the participant and timing are required; blank mode or artifact
    /// become `None`. Any mode string is accepted.
    pub fn validate(self) -> Result<(ParticipantId, TimeRecord), ValidationError> {
        let participant_id = self.participant_id.filter(|v| !v.is_empty());
        let (Some(participant_id), Some(exit_time), Some(duration_ms)) =
            (participant_id, self.exit_time, self.duration_ms)
        else {
            return Err(ValidationError::MissingFields(TIME_FIELDS));
        };

        let mode = self
            .mode
            .as_deref()
            .and_then(none_if_blank)
            .map(str::to_string);
        let artifact_id = self
            .artifact_id
            .as_deref()
            .and_then(none_if_blank)
            .map(ArtifactId::from);

        Ok((
            ParticipantId::new(participant_id),
            TimeRecord {
                mode,
                artifact_id,
                exit_time,
                duration_ms,
            },
        ))
    }
}
