//! Telemetry - local event log plus fire-and-forget forwarding
//!
//! Mode selections, page dwell and submissions are appended to an in-memory
//! log. Dwell records and submissions are also posted to the collector once
//! a participant id is known. Forwarding failures are logged and swallowed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use ugclab_domain::{ArtifactId, DwellRecord, InputKind, LogEntry, ModeType, ParticipantId};
use ugclab_shared::{TimeRecordSubmission, UgcSubmission};

use crate::ports::outbound::{ClockPort, CollectorPort};

/// Placeholder content forwarded for voice submissions.
pub const VOICE_MARKER: &str = "[voice]";

pub struct Telemetry {
    collector: Arc<dyn CollectorPort>,
    clock: Arc<dyn ClockPort>,
    state: Mutex<TelemetryState>,
}

#[derive(Default)]
struct TelemetryState {
    participant_id: Option<ParticipantId>,
    logs: Vec<LogEntry>,
    page_timer: Option<PageTimer>,
}

struct PageTimer {
    mode: Option<ModeType>,
    artifact_id: Option<ArtifactId>,
    entered_at: DateTime<Utc>,
}

impl Telemetry {
    pub fn new(collector: Arc<dyn CollectorPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            collector,
            clock,
            state: Mutex::new(TelemetryState::default()),
        }
    }

    pub async fn set_participant(&self, participant_id: ParticipantId) {
        tracing::info!(participant_id = %participant_id, "Telemetry participant set");
        self.state.lock().await.participant_id = Some(participant_id);
    }

    pub async fn record_mode_select(&self, mode: ModeType) {
        let entry = LogEntry::mode_select(mode, self.clock.now());
        tracing::info!(mode = %mode, "Mode selected");
        self.state.lock().await.logs.push(entry);
    }

    /// Starts (or restarts) the page timer.
    pub async fn start_page_timer(&self, mode: Option<ModeType>, artifact_id: Option<ArtifactId>) {
        let entered_at = self.clock.now();
        tracing::debug!(mode = ?mode, artifact_id = ?artifact_id, "Page timer started");
        self.state.lock().await.page_timer = Some(PageTimer {
            mode,
            artifact_id,
            entered_at,
        });
    }

    pub async fn has_page_timer(&self) -> bool {
        self.state.lock().await.page_timer.is_some()
    }

    /// Stops the page timer and records the dwell.
    ///
    /// The record is filed under the page the timer was started for;
    /// `mode` and `artifact_id` name the page the caller is leaving and only
    /// flag a mismatch. Returns `None` when no timer was running or the
    /// dwell was too short to count.
    pub async fn log_page_dwell(
        &self,
        mode: Option<ModeType>,
        artifact_id: Option<ArtifactId>,
    ) -> Option<DwellRecord> {
        let exited_at = self.clock.now();
        let (record, participant_id) = {
            let mut state = self.state.lock().await;
            let timer = state.page_timer.take()?;
            if timer.mode != mode || timer.artifact_id != artifact_id {
                tracing::warn!(
                    started_mode = ?timer.mode,
                    started_artifact = ?timer.artifact_id,
                    stopped_mode = ?mode,
                    stopped_artifact = ?artifact_id,
                    "Page timer stopped for a different page than it started on"
                );
            }

            let Some(record) =
                DwellRecord::measure(timer.mode, timer.artifact_id, timer.entered_at, exited_at)
            else {
                tracing::debug!(mode = ?timer.mode, "Discarding dwell below threshold");
                return None;
            };
            state.logs.push(LogEntry::page_view(&record));
            (record, state.participant_id.clone())
        };

        tracing::info!(
            mode = ?record.mode,
            artifact_id = ?record.artifact_id,
            duration_ms = record.duration_ms,
            "Page dwell"
        );

        if let Some(participant_id) = participant_id {
            let submission = TimeRecordSubmission::new(
                &participant_id,
                record.mode,
                record.artifact_id.as_ref(),
                record.exit_time.timestamp_millis(),
                record.duration_ms,
            );
            if let Err(e) = self.collector.post_time_record(&submission).await {
                tracing::warn!(participant_id = %participant_id, error = %e, "Failed to forward time record");
            }
        }
        Some(record)
    }

    /// Logs a submission and forwards it to the collector.
    ///
    /// The local log keeps only the text length; voice input is forwarded as
    /// [`VOICE_MARKER`].
    pub async fn record_submission(
        &self,
        mode: ModeType,
        input_type: InputKind,
        content: &str,
        artifact_id: Option<ArtifactId>,
    ) {
        let now = self.clock.now();
        let entry = LogEntry::submission(
            mode,
            input_type,
            content.chars().count(),
            artifact_id.clone(),
            now,
        );
        tracing::info!(mode = %mode, input_type = ?input_type, "User submission");

        let participant_id = {
            let mut state = self.state.lock().await;
            state.logs.push(entry);
            state.participant_id.clone()
        };

        let (Some(participant_id), Some(artifact_id)) = (participant_id, artifact_id) else {
            return;
        };
        let forwarded = match input_type {
            InputKind::Text => content,
            InputKind::Audio => VOICE_MARKER,
        };
        let submission = UgcSubmission::new(
            &participant_id,
            forwarded,
            &artifact_id,
            mode,
            now.timestamp_millis(),
        );
        if let Err(e) = self.collector.post_ugc(&submission).await {
            tracing::warn!(participant_id = %participant_id, error = %e, "Failed to forward submission");
        }
    }

    pub async fn export_logs(&self) -> Vec<LogEntry> {
        self.state.lock().await.logs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ManualClock;
    use crate::ports::outbound::{CollectorError, MockCollectorPort};
    use chrono::TimeZone;
    use mockall::predicate::*;
    use ugclab_domain::LogEventType;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::at(
            Utc.with_ymd_and_hms(2025, 5, 18, 9, 0, 0)
                .single()
                .expect("valid time"),
        ))
    }

    async fn telemetry_for(collector: MockCollectorPort, clock: Arc<ManualClock>) -> Telemetry {
        let telemetry = Telemetry::new(Arc::new(collector), clock);
        telemetry.set_participant(ParticipantId::new("P5")).await;
        telemetry
    }

    mod dwell {
        use super::*;

        #[tokio::test]
        async fn short_dwell_is_never_forwarded() {
            let mut collector = MockCollectorPort::new();
            collector.expect_post_time_record().times(0);
            let clock = clock();
            let telemetry = telemetry_for(collector, clock.clone()).await;

            telemetry.start_page_timer(Some(ModeType::FollowMe), None).await;
            clock.advance_ms(99);
            let record = telemetry.log_page_dwell(Some(ModeType::FollowMe), None).await;

            assert!(record.is_none());
            assert!(telemetry.export_logs().await.is_empty());
            assert!(!telemetry.has_page_timer().await);
        }

        #[tokio::test]
        async fn dwell_is_logged_and_forwarded() {
            let clock = clock();
            let exit_ms = clock.now().timestamp_millis() + 4_000;
            let expected = TimeRecordSubmission::new(
                &ParticipantId::new("P5"),
                Some(ModeType::CrowdChat),
                Some(&ArtifactId::new("ding")),
                exit_ms,
                4_000,
            );
            let mut collector = MockCollectorPort::new();
            collector
                .expect_post_time_record()
                .with(eq(expected))
                .times(1)
                .returning(|_| Ok(()));
            let telemetry = telemetry_for(collector, clock.clone()).await;

            let ding = Some(ArtifactId::new("ding"));
            telemetry
                .start_page_timer(Some(ModeType::CrowdChat), ding.clone())
                .await;
            clock.advance_ms(4_000);
            let record = telemetry
                .log_page_dwell(Some(ModeType::CrowdChat), ding)
                .await
                .expect("recorded");

            assert_eq!(record.duration_ms, 4_000);
            let logs = telemetry.export_logs().await;
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].event_type, LogEventType::PageView);
            assert_eq!(logs[0].details.duration_ms, Some(4_000));
        }

        #[tokio::test]
        async fn dwell_is_filed_under_the_page_the_timer_started_on() {
            let mut collector = MockCollectorPort::new();
            collector
                .expect_post_time_record()
                .withf(|s| s.artifact_id.as_deref() == Some("ding") && s.duration_ms == Some(5_000))
                .times(1)
                .returning(|_| Ok(()));
            let clock = clock();
            let telemetry = telemetry_for(collector, clock.clone()).await;

            telemetry
                .start_page_timer(Some(ModeType::CrowdChat), Some(ArtifactId::new("ding")))
                .await;
            clock.advance_ms(5_000);
            let record = telemetry
                .log_page_dwell(Some(ModeType::CrowdChat), None)
                .await
                .expect("recorded");

            assert_eq!(record.mode, Some(ModeType::CrowdChat));
            assert_eq!(record.artifact_id, Some(ArtifactId::new("ding")));
            let logs = telemetry.export_logs().await;
            assert_eq!(logs[0].details.artifact_id, Some(ArtifactId::new("ding")));
        }

        #[tokio::test]
        async fn no_running_timer_is_a_no_op() {
            let mut collector = MockCollectorPort::new();
            collector.expect_post_time_record().times(0);
            let telemetry = telemetry_for(collector, clock()).await;

            assert!(telemetry.log_page_dwell(None, None).await.is_none());
        }

        #[tokio::test]
        async fn forwarding_failure_is_swallowed() {
            let mut collector = MockCollectorPort::new();
            collector
                .expect_post_time_record()
                .returning(|_| Err(CollectorError::RequestFailed("connection refused".into())));
            let clock = clock();
            let telemetry = telemetry_for(collector, clock.clone()).await;

            telemetry.start_page_timer(None, None).await;
            clock.advance_ms(1_000);

            assert!(telemetry.log_page_dwell(None, None).await.is_some());
            assert_eq!(telemetry.export_logs().await.len(), 1);
        }

        #[tokio::test]
        async fn nothing_is_forwarded_before_a_participant_is_known() {
            let mut collector = MockCollectorPort::new();
            collector.expect_post_time_record().times(0);
            let clock = clock();
            let telemetry = Telemetry::new(Arc::new(collector), clock.clone());

            telemetry.start_page_timer(None, None).await;
            clock.advance_ms(1_000);

            assert!(telemetry.log_page_dwell(None, None).await.is_some());
        }
    }

    mod submissions {
        use super::*;

        #[tokio::test]
        async fn text_is_forwarded_and_only_its_length_logged() {
            let mut collector = MockCollectorPort::new();
            collector
                .expect_post_ugc()
                .withf(|s| s.content.as_deref() == Some("Lovely glaze") && s.mode.as_deref() == Some("comment_board"))
                .times(1)
                .returning(|_| Ok(()));
            let telemetry = telemetry_for(collector, clock()).await;

            telemetry
                .record_submission(
                    ModeType::CommentBoard,
                    InputKind::Text,
                    "Lovely glaze",
                    Some(ArtifactId::new("vase")),
                )
                .await;

            let logs = telemetry.export_logs().await;
            assert_eq!(logs[0].event_type, LogEventType::Submission);
            assert_eq!(logs[0].details.content_length, Some(12));
        }

        #[tokio::test]
        async fn voice_is_forwarded_as_marker() {
            let mut collector = MockCollectorPort::new();
            collector
                .expect_post_ugc()
                .withf(|s| s.content.as_deref() == Some(VOICE_MARKER))
                .times(1)
                .returning(|_| Ok(()));
            let telemetry = telemetry_for(collector, clock()).await;

            telemetry
                .record_submission(
                    ModeType::CrowdChat,
                    InputKind::Audio,
                    "blob:voice-1",
                    Some(ArtifactId::new("ding")),
                )
                .await;

            let logs = telemetry.export_logs().await;
            assert_eq!(logs[0].details.content_length, None);
        }

        #[tokio::test]
        async fn rejected_submission_is_swallowed() {
            let mut collector = MockCollectorPort::new();
            collector.expect_post_ugc().returning(|_| {
                Err(CollectorError::Rejected {
                    status: 400,
                    body: "Missing required fields".into(),
                })
            });
            let telemetry = telemetry_for(collector, clock()).await;

            telemetry
                .record_submission(
                    ModeType::FollowMe,
                    InputKind::Text,
                    "hi",
                    Some(ArtifactId::new("ding")),
                )
                .await;

            assert_eq!(telemetry.export_logs().await.len(), 1);
        }
    }

    #[tokio::test]
    async fn mode_selection_is_logged_locally_only() {
        let collector = MockCollectorPort::new();
        let telemetry = telemetry_for(collector, clock()).await;

        telemetry.record_mode_select(ModeType::CollectiveStory).await;

        let logs = telemetry.export_logs().await;
        assert_eq!(logs[0].event_type, LogEventType::ModeSelect);
        assert_eq!(logs[0].details.mode, Some(ModeType::CollectiveStory));
    }
}
