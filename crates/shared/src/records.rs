//! Records the collector appends per participant

use serde::{Deserialize, Serialize};
use ugclab_domain::{ArtifactId, ParticipantId};

/// A submitted reply or comment. Voice input is stored as a marker text.
///
/// Modes are kept as the strings clients sent, so records written by any
/// client version load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcContent {
    pub content: String,
    pub artifact_id: ArtifactId,
    pub mode: String,
    /// Submission time, epoch milliseconds
    pub timestamp: i64,
}

/// Dwell time on a page. `mode` is `None` on the home page, `artifact_id`
/// is `None` on list pages and tours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    pub mode: Option<String>,
    pub artifact_id: Option<ArtifactId>,
    /// Epoch milliseconds
    pub exit_time: i64,
    pub duration_ms: u64,
}

impl TimeRecord {
    pub fn enter_time(&self) -> i64 {
        self.exit_time
            .saturating_sub(i64::try_from(self.duration_ms).unwrap_or(i64::MAX))
    }
}

/// Everything recorded for one participant, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantData {
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub ugc_contents: Vec<UgcContent>,
    #[serde(default)]
    pub time_records: Vec<TimeRecord>,
}

impl ParticipantData {
    pub fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            ugc_contents: Vec::new(),
            time_records: Vec::new(),
        }
    }
}
