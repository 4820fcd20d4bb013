//! Tour session - runs one guided tour for the participant
//!
//! Owns the tour's `TourNarrative` and turns the events it returns into side
//! effects: dwell timing and submissions go to telemetry, viewing starts go
//! to the task gate, and every transition is saved to the session store so
//! the tour can be resumed.
//!
//! Dwell is split into segments: time on the tour view itself (no artifact)
//! and time actively viewing each stage's artifact.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use ugclab_domain::{
    ArtifactId, GuideLines, InputKind, NarrativeState, TourEvent, TourMode, TourNarrative,
    TourState, TourTiming,
};

use super::{ContentRepository, SessionStore, TaskGate, Telemetry};
use crate::ports::outbound::ClockPort;

pub struct TourSession {
    tour: TourNarrative,
    store: Arc<Mutex<SessionStore>>,
    telemetry: Arc<Telemetry>,
    gate: Arc<Mutex<TaskGate>>,
    clock: Arc<dyn ClockPort>,
    /// Artifact whose viewing is being timed, between `ViewingStarted` and
    /// `ViewingEnded`.
    viewing: Option<ArtifactId>,
}

impl TourSession {
    /// Opens the tour for `mode`, resuming saved progress when there is any.
    pub async fn open(
        mode: TourMode,
        content: &ContentRepository,
        store: Arc<Mutex<SessionStore>>,
        telemetry: Arc<Telemetry>,
        gate: Arc<Mutex<TaskGate>>,
        clock: Arc<dyn ClockPort>,
        timing: TourTiming,
    ) -> Self {
        let script = content.script_for(mode);
        let lines = GuideLines::for_mode(mode, content.guide_profile().name);
        let saved = store.lock().await.narrative(mode).cloned();

        let tour = match saved {
            Some(saved) => {
                tracing::info!(mode = %mode, stage = saved.current_stage, "Resuming tour");
                TourNarrative::resume_with_timing(mode, script, lines, saved, timing)
            }
            None => {
                tracing::info!(mode = %mode, stages = script.len(), "Opening tour");
                TourNarrative::new(mode, script, lines).with_timing(timing)
            }
        };

        // A tour resumed mid-stage is still viewing that stage's artifact.
        let viewing = match tour.state() {
            TourState::Exploring { .. } => tour.current_artifact().map(|a| a.id.clone()),
            _ => None,
        };

        let session = Self {
            tour,
            store,
            telemetry,
            gate,
            clock,
            viewing,
        };
        session
            .telemetry
            .start_page_timer(Some(mode.mode()), session.viewing.clone())
            .await;
        session.save().await;
        session
    }

    pub fn tour(&self) -> &TourNarrative {
        &self.tour
    }

    pub fn mode(&self) -> TourMode {
        self.tour.mode()
    }

    pub fn snapshot(&self) -> NarrativeState {
        self.tour.snapshot()
    }

    // =========================================================================
    // Participant actions
    // =========================================================================

    pub async fn primary_action(&mut self) -> Vec<TourEvent> {
        let events = self.tour.primary_action();
        self.handle(events).await
    }

    pub async fn start(&mut self) -> Vec<TourEvent> {
        let events = self.tour.start();
        self.handle(events).await
    }

    pub async fn found_it(&mut self) -> Vec<TourEvent> {
        let events = self.tour.found_it();
        self.handle(events).await
    }

    pub async fn reply(&mut self, text: &str) -> Vec<TourEvent> {
        let events = self.tour.reply(text);
        self.handle(events).await
    }

    pub async fn advance(&mut self) -> Vec<TourEvent> {
        let events = self.tour.advance();
        self.handle(events).await
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Moves the tour's virtual clock; for callers that own their own timer.
    pub async fn advance_by(&mut self, elapsed: Duration) -> Vec<TourEvent> {
        let events = self.tour.advance_by(elapsed);
        self.handle(events).await
    }

    /// Applies every pending step at once.
    pub async fn settle(&mut self) -> Vec<TourEvent> {
        let events = self.tour.settle();
        self.handle(events).await
    }

    /// Sleeps through the pending steps in real time until the tour waits
    /// on the participant again.
    pub async fn run_until_idle(&mut self) -> Vec<TourEvent> {
        let mut events = Vec::new();
        while let Some(wait) = self.tour.next_effect_in() {
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            events.extend(self.advance_by(wait).await);
        }
        events
    }

    /// The tour view goes away: pending steps are dropped, the running dwell
    /// segment is recorded and progress is saved.
    pub async fn close(&mut self) {
        self.tour.cancel_pending();
        self.telemetry
            .log_page_dwell(Some(self.mode().mode()), self.viewing.take())
            .await;
        self.save().await;
        tracing::info!(mode = %self.mode(), state = ?self.tour.state(), "Tour closed");
    }

    async fn handle(&mut self, events: Vec<TourEvent>) -> Vec<TourEvent> {
        for event in &events {
            match event {
                TourEvent::TourStarted { mode } => {
                    tracing::info!(mode = %mode, "Tour started");
                }
                TourEvent::ViewingStarted { mode, artifact_id } => {
                    self.telemetry.log_page_dwell(Some(mode.mode()), None).await;
                    self.telemetry
                        .start_page_timer(Some(mode.mode()), Some(artifact_id.clone()))
                        .await;
                    self.viewing = Some(artifact_id.clone());
                    self.gate.lock().await.on_task_start(
                        mode.mode(),
                        Some(artifact_id),
                        self.clock.now(),
                    );
                }
                TourEvent::ViewingEnded { mode, artifact_id } => {
                    self.telemetry
                        .log_page_dwell(Some(mode.mode()), Some(artifact_id.clone()))
                        .await;
                    self.viewing = None;
                    self.telemetry.start_page_timer(Some(mode.mode()), None).await;
                }
                TourEvent::ReplySubmitted {
                    mode,
                    artifact_id,
                    text,
                } => {
                    self.telemetry
                        .record_submission(
                            mode.mode(),
                            InputKind::Text,
                            text,
                            Some(artifact_id.clone()),
                        )
                        .await;
                }
                TourEvent::ReminderShown => tracing::debug!("Reply reminder shown"),
                TourEvent::ReminderDismissed => tracing::debug!("Reply reminder dismissed"),
                TourEvent::TourCompleted { mode } => {
                    tracing::info!(mode = %mode, "Tour completed");
                }
            }
        }
        self.save().await;
        events
    }

    async fn save(&self) {
        self.store
            .lock()
            .await
            .save_narrative(self.tour.mode(), self.tour.snapshot());
    }
}
