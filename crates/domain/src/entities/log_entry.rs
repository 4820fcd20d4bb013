//! Telemetry records - mode selections, page dwell and submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ArtifactId, ModeType};

/// Dwell measurements shorter than this are discarded as noise.
pub const MIN_DWELL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEventType {
    ModeSelect,
    PageView,
    Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Audio,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputKind>,
    /// Length only; the text itself never enters the local log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<ArtifactId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: LogEventType,
    pub details: LogDetails,
}

impl LogEntry {
    pub fn mode_select(mode: ModeType, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            event_type: LogEventType::ModeSelect,
            details: LogDetails {
                mode: Some(mode),
                ..LogDetails::default()
            },
        }
    }

    pub fn page_view(record: &DwellRecord) -> Self {
        Self {
            timestamp: record.exit_time,
            event_type: LogEventType::PageView,
            details: LogDetails {
                mode: record.mode,
                duration_ms: Some(record.duration_ms),
                artifact_id: record.artifact_id.clone(),
                ..LogDetails::default()
            },
        }
    }

    /// Audio submissions carry no length.
    pub fn submission(
        mode: ModeType,
        input_type: InputKind,
        content_length: usize,
        artifact_id: Option<ArtifactId>,
        at: DateTime<Utc>,
    ) -> Self {
        let content_length = match input_type {
            InputKind::Text => Some(content_length),
            InputKind::Audio => None,
        };
        Self {
            timestamp: at,
            event_type: LogEventType::Submission,
            details: LogDetails {
                mode: Some(mode),
                input_type: Some(input_type),
                content_length,
                artifact_id,
                ..LogDetails::default()
            },
        }
    }
}

/// Time a participant spent actively viewing a page or artifact.
///
/// `mode` is `None` for the home page and `artifact_id` is `None` for list pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DwellRecord {
    pub mode: Option<ModeType>,
    pub artifact_id: Option<ArtifactId>,
    pub exit_time: DateTime<Utc>,
    pub duration_ms: u64,
}

impl DwellRecord {
    /// Measures a dwell interval, or `None` when it is below [`MIN_DWELL_MS`].
    pub fn measure(
        mode: Option<ModeType>,
        artifact_id: Option<ArtifactId>,
        entered_at: DateTime<Utc>,
        exited_at: DateTime<Utc>,
    ) -> Option<Self> {
        let elapsed = exited_at.signed_duration_since(entered_at).num_milliseconds();
        let duration_ms = u64::try_from(elapsed).ok()?;
        Self::from_duration(mode, artifact_id, exited_at, duration_ms)
    }

    pub fn from_duration(
        mode: Option<ModeType>,
        artifact_id: Option<ArtifactId>,
        exit_time: DateTime<Utc>,
        duration_ms: u64,
    ) -> Option<Self> {
        if duration_ms < MIN_DWELL_MS {
            return None;
        }
        Some(Self {
            mode,
            artifact_id,
            exit_time,
            duration_ms,
        })
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.exit_time - chrono::Duration::milliseconds(self.duration_ms as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + ms)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn short_dwell_is_discarded() {
        assert!(DwellRecord::measure(Some(ModeType::FollowMe), None, at(0), at(99)).is_none());
    }

    #[test]
    fn dwell_at_threshold_is_kept() {
        let record = DwellRecord::measure(Some(ModeType::FollowMe), None, at(0), at(100))
            .expect("kept");
        assert_eq!(record.duration_ms, 100);
        assert_eq!(record.entered_at(), at(0));
    }

    #[test]
    fn clock_going_backwards_is_discarded() {
        assert!(DwellRecord::measure(None, None, at(500), at(0)).is_none());
    }

    #[test]
    fn audio_submission_omits_length() {
        let entry = LogEntry::submission(ModeType::CommentBoard, InputKind::Audio, 42, None, at(0));
        assert_eq!(entry.details.content_length, None);
        let entry = LogEntry::submission(ModeType::CommentBoard, InputKind::Text, 42, None, at(0));
        assert_eq!(entry.details.content_length, Some(42));
    }
}
