//! Experiment session - one participant's path through the app
//!
//! Home -> mode -> (artifact list -> artifact) or (guided tour), and back.
//! Moving forward is only possible from the home page or the list, so every
//! way out of an artifact goes through the task gate. Page dwell is measured
//! for every page: the home page has no mode, list pages have no artifact.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use ugclab_domain::{
    Artifact, ArtifactId, ContentItem, DomainError, InputKind, ModeType, ParticipantId,
    TourTiming,
};

use super::{ContentRepository, LeaveOutcome, SessionStore, TaskGate, Telemetry, TourSession};
use crate::ports::outbound::{ClockPort, CollectorPort};

/// A forward navigation from the wrong page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("Modes are chosen from the home page")]
    NotHome,
    #[error("Artifacts are opened from an artifact list")]
    NotOnList,
}

/// What the participant sees after choosing a mode.
pub enum ModeEntry {
    ArtifactList(Vec<Artifact>),
    Tour(TourSession),
}

pub struct ExperimentSession {
    participant_id: ParticipantId,
    content: Arc<ContentRepository>,
    store: Arc<Mutex<SessionStore>>,
    telemetry: Arc<Telemetry>,
    gate: Arc<Mutex<TaskGate>>,
    clock: Arc<dyn ClockPort>,
    timing: TourTiming,
    current_mode: Option<ModeType>,
    selected_artifact: Option<ArtifactId>,
}

impl ExperimentSession {
    /// Starts a session from the number typed on the entry screen.
    pub async fn begin(
        raw_participant: &str,
        content: Arc<ContentRepository>,
        collector: Arc<dyn CollectorPort>,
        clock: Arc<dyn ClockPort>,
        task_lock: Duration,
    ) -> Result<Self, DomainError> {
        let participant_id = ParticipantId::from_input(raw_participant)?;
        let main_mode = participant_id.assigned_main_mode();
        tracing::info!(participant_id = %participant_id, main_mode = ?main_mode, "Participant registered");

        let mut store = SessionStore::new();
        store.set_participant(participant_id.clone());
        let telemetry = Arc::new(Telemetry::new(collector, clock.clone()));
        telemetry.set_participant(participant_id.clone()).await;
        telemetry.start_page_timer(None, None).await;

        Ok(Self {
            participant_id,
            content,
            store: Arc::new(Mutex::new(store)),
            telemetry,
            gate: Arc::new(Mutex::new(TaskGate::new(main_mode, task_lock))),
            clock,
            timing: TourTiming::default(),
            current_mode: None,
            selected_artifact: None,
        })
    }

    pub fn with_timing(mut self, timing: TourTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    pub async fn main_mode(&self) -> Option<ModeType> {
        self.gate.lock().await.main_mode()
    }

    pub fn current_mode(&self) -> Option<ModeType> {
        self.current_mode
    }

    pub fn selected_artifact(&self) -> Option<&ArtifactId> {
        self.selected_artifact.as_ref()
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub async fn is_locked(&self) -> bool {
        self.gate.lock().await.is_locked(self.clock.now())
    }

    /// Home -> mode. Tours open directly; the other modes show the list.
    pub async fn select_mode(&mut self, mode: ModeType) -> Result<ModeEntry, NavigationError> {
        if let Some(current) = self.current_mode {
            tracing::debug!(mode = %mode, current_mode = %current, "Mode selection outside the home page");
            return Err(NavigationError::NotHome);
        }

        self.telemetry.log_page_dwell(None, None).await;
        self.telemetry.record_mode_select(mode).await;
        self.gate.lock().await.enter_mode(mode);
        self.current_mode = Some(mode);
        self.selected_artifact = None;

        let entry = match mode.tour_mode() {
            Some(tour_mode) => ModeEntry::Tour(
                TourSession::open(
                    tour_mode,
                    &self.content,
                    self.store.clone(),
                    self.telemetry.clone(),
                    self.gate.clone(),
                    self.clock.clone(),
                    self.timing,
                )
                .await,
            ),
            None => {
                self.telemetry.start_page_timer(Some(mode), None).await;
                ModeEntry::ArtifactList(self.content.list_artifacts())
            }
        };
        Ok(entry)
    }

    /// List -> artifact. Starts the task lock when this is the main mode.
    pub async fn select_artifact(
        &mut self,
        artifact_id: ArtifactId,
    ) -> Result<Vec<ContentItem>, NavigationError> {
        let Some(mode) = self.current_mode.filter(|m| !m.is_tour()) else {
            return Err(NavigationError::NotOnList);
        };
        if let Some(open) = &self.selected_artifact {
            tracing::debug!(artifact_id = %artifact_id, open_artifact = %open, "Artifact selection outside the list");
            return Err(NavigationError::NotOnList);
        }

        self.telemetry.log_page_dwell(Some(mode), None).await;
        self.telemetry
            .start_page_timer(Some(mode), Some(artifact_id.clone()))
            .await;
        self.gate
            .lock()
            .await
            .on_task_start(mode, Some(&artifact_id), self.clock.now());
        self.selected_artifact = Some(artifact_id.clone());

        Ok(self.visible_content(&artifact_id).await)
    }

    /// Authored content merged with this participant's own submissions:
    /// comment boards show the newest comment first, chats read top-down.
    pub async fn visible_content(&self, artifact_id: &ArtifactId) -> Vec<ContentItem> {
        let Some(mode) = self.current_mode else {
            return Vec::new();
        };
        let authored = self.content.content_for(artifact_id, mode);
        let store = self.store.lock().await;

        let merged = match mode {
            ModeType::CommentBoard => store
                .comments(artifact_id)
                .iter()
                .cloned()
                .chain(authored)
                .collect(),
            ModeType::CrowdChat => authored
                .into_iter()
                .chain(store.chat_messages(artifact_id).iter().cloned())
                .collect(),
            ModeType::FollowMe | ModeType::CollectiveStory => authored,
        };
        merged
    }

    /// A comment or chat message on the open artifact. Blank text is ignored.
    pub async fn submit(&mut self, input_type: InputKind, text: &str) -> Option<ContentItem> {
        let mode = self.current_mode.filter(|m| !m.is_tour())?;
        let artifact_id = self.selected_artifact.clone()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let item = {
            let mut store = self.store.lock().await;
            let item = store.user_item(&artifact_id, mode, text);
            match mode {
                ModeType::CommentBoard => store.add_comment(&artifact_id, item.clone()),
                _ => store.add_chat_message(&artifact_id, item.clone()),
            }
            item
        };

        self.telemetry
            .record_submission(mode, input_type, text, Some(artifact_id))
            .await;
        Some(item)
    }

    /// The back button outside of tours: artifact -> list -> home.
    pub async fn back(&mut self) -> LeaveOutcome {
        let Some(mode) = self.current_mode else {
            return LeaveOutcome::Allowed;
        };

        if let Some(artifact_id) = self.selected_artifact.clone() {
            let outcome = self.gate.lock().await.try_leave(self.clock.now());
            if outcome != LeaveOutcome::Allowed {
                return outcome;
            }
            self.telemetry
                .log_page_dwell(Some(mode), Some(artifact_id))
                .await;
            self.selected_artifact = None;
            self.telemetry.start_page_timer(Some(mode), None).await;
            return LeaveOutcome::Allowed;
        }

        self.telemetry.log_page_dwell(Some(mode), None).await;
        self.go_home().await;
        LeaveOutcome::Allowed
    }

    /// The back button inside a tour. On success the tour is closed and the
    /// participant is home again.
    pub async fn leave_tour(&mut self, tour: &mut TourSession) -> LeaveOutcome {
        let outcome = self.gate.lock().await.try_leave(self.clock.now());
        if outcome != LeaveOutcome::Allowed {
            return outcome;
        }
        tour.close().await;
        self.go_home().await;
        LeaveOutcome::Allowed
    }

    async fn go_home(&mut self) {
        self.current_mode = None;
        self.selected_artifact = None;
        self.telemetry.start_page_timer(None, None).await;
    }
}
