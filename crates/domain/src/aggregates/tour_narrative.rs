//! TourNarrative aggregate - the guided-tour conversation engine
//!
//! One aggregate drives both guided modes. A tour walks an ordered script of
//! stages; for each stage the participant first locates the artifact in the
//! gallery, then reads the guide's content and replies before moving on.
//!
//! # Time
//!
//! Guide messages arrive after short delays. Instead of sleeping, the
//! aggregate queues deferred effects on an [`EffectSchedule`] and applies them
//! when the caller moves virtual time forward with [`TourNarrative::advance_by`]
//! or [`TourNarrative::settle`]. Dropping the aggregate, or calling
//! [`TourNarrative::cancel_pending`], guarantees nothing fires later.
//!
//! # Invariants
//!
//! - The transcript only grows
//! - `current_stage` never decreases and stays below the script length until
//!   the tour completes
//! - A reply is accepted only while exploring and waiting for the participant
//! - "Finished" advances only after a reply, and at most once per stage

use std::time::Duration;

use crate::common::none_if_blank;
use crate::entities::{Artifact, ChatMessage, MessageKind, ScriptStage};
use crate::events::TourEvent;
use crate::value_objects::{
    ControlAction, EffectSchedule, GuideLines, NarrativeState, TourControl, TourState, TourTiming,
};
use crate::TourMode;

/// Deferred step of the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TourEffect {
    Say(ChatMessage),
    /// Divider, then either the stage at this index or the end of the tour
    EnterStage(usize),
    RevealIntroCard(usize),
    PresentContent(usize),
    AskForReply(usize),
    DismissReminder,
}

#[derive(Debug, Clone)]
pub struct TourNarrative {
    mode: TourMode,
    lines: GuideLines,
    timing: TourTiming,
    script: Vec<ScriptStage>,
    history: Vec<ChatMessage>,
    current_stage: usize,
    state: TourState,
    can_confirm_location: bool,
    waiting_for_user: bool,
    has_replied: bool,
    reminder_visible: bool,
    schedule: EffectSchedule<TourEffect>,
}

impl TourNarrative {
    /// Starts a fresh tour: the transcript holds only the welcome message.
    pub fn new(mode: TourMode, script: Vec<ScriptStage>, lines: GuideLines) -> Self {
        let mut tour = Self::blank(mode, script, lines);
        let welcome = ChatMessage::guide(tour.lines.narrator.clone(), tour.lines.welcome.clone());
        tour.history.push(welcome);
        tour.waiting_for_user = true;
        tour
    }

    /// Rebuilds a tour from persisted progress.
    ///
    /// The phase is inferred from the last message: an intro card means the
    /// participant was locating, guide text means a reply is expected, and
    /// their own text means they already replied. A trailing divider
    /// re-enters its stage from the top.
    pub fn resume(
        mode: TourMode,
        script: Vec<ScriptStage>,
        lines: GuideLines,
        saved: NarrativeState,
    ) -> Self {
        Self::resume_with_timing(mode, script, lines, saved, TourTiming::default())
    }

    /// [`resume`](Self::resume) with custom pacing, which a re-entered stage
    /// already uses for its first steps.
    pub fn resume_with_timing(
        mode: TourMode,
        script: Vec<ScriptStage>,
        lines: GuideLines,
        saved: NarrativeState,
        timing: TourTiming,
    ) -> Self {
        if saved.is_empty() {
            return Self::new(mode, script, lines).with_timing(timing);
        }

        let started = saved.has_started();
        let last_kind = saved.last_kind();
        let mut tour = Self::blank(mode, script, lines).with_timing(timing);
        tour.history = saved.history;
        tour.current_stage = saved.current_stage;

        if saved.is_tour_complete {
            tour.state = TourState::Complete;
            return tour;
        }
        if !started {
            tour.waiting_for_user = true;
            return tour;
        }
        if tour.current_stage >= tour.script.len() {
            // Script shrank since the state was saved
            tour.state = TourState::Complete;
            return tour;
        }

        let stage = tour.current_stage;
        match last_kind {
            Some(MessageKind::IntroBubble) => {
                tour.state = TourState::Locating { stage };
                tour.can_confirm_location = true;
            }
            Some(MessageKind::GuideText) => {
                tour.state = TourState::Exploring { stage };
                tour.waiting_for_user = true;
            }
            Some(MessageKind::UserText) => {
                tour.state = TourState::Exploring { stage };
                tour.waiting_for_user = true;
                tour.has_replied = true;
            }
            Some(MessageKind::Divider) | None => tour.begin_stage(stage),
        }
        tour
    }

    /// Replaces the default pacing.
    pub fn with_timing(mut self, timing: TourTiming) -> Self {
        self.timing = timing;
        self
    }

    fn blank(mode: TourMode, script: Vec<ScriptStage>, lines: GuideLines) -> Self {
        Self {
            mode,
            lines,
            timing: TourTiming::default(),
            script,
            history: Vec::new(),
            current_stage: 0,
            state: TourState::NotStarted,
            can_confirm_location: false,
            waiting_for_user: false,
            has_replied: false,
            reminder_visible: false,
            schedule: EffectSchedule::new(),
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn mode(&self) -> TourMode {
        self.mode
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn script(&self) -> &[ScriptStage] {
        &self.script
    }

    pub fn current_stage(&self) -> usize {
        self.current_stage
    }

    pub fn current_artifact(&self) -> Option<&Artifact> {
        self.script.get(self.current_stage).map(|stage| &stage.artifact)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn is_waiting_for_user(&self) -> bool {
        self.waiting_for_user
    }

    pub fn has_replied(&self) -> bool {
        self.has_replied
    }

    pub fn can_confirm_location(&self) -> bool {
        self.can_confirm_location
    }

    pub fn reminder(&self) -> Option<&str> {
        self.reminder_visible.then_some(self.lines.reminder.as_str())
    }

    /// Whether the free-text input should be enabled.
    pub fn accepts_reply(&self) -> bool {
        matches!(self.state, TourState::Exploring { .. }) && self.waiting_for_user
    }

    pub fn control(&self) -> TourControl {
        match self.state {
            TourState::NotStarted => TourControl::enabled(ControlAction::StartTour),
            TourState::Complete => TourControl::disabled(ControlAction::Ended),
            TourState::Locating { .. } => TourControl {
                action: ControlAction::Locate,
                enabled: self.can_confirm_location,
                reminds_on_press: false,
            },
            TourState::Exploring { .. } => TourControl {
                action: ControlAction::Finished,
                enabled: self.has_replied,
                reminds_on_press: !self.has_replied && self.waiting_for_user,
            },
        }
    }

    /// Progress to persist after each transition.
    pub fn snapshot(&self) -> NarrativeState {
        NarrativeState {
            history: self.history.clone(),
            current_stage: self.current_stage,
            is_tour_complete: self.state.is_complete(),
        }
    }

    // =========================================================================
    // Participant actions
    // =========================================================================

    /// Runs whatever the primary control currently offers.
    pub fn primary_action(&mut self) -> Vec<TourEvent> {
        match self.control().action {
            ControlAction::StartTour => self.start(),
            ControlAction::Locate => self.found_it(),
            ControlAction::Finished => self.advance(),
            ControlAction::Ended => Vec::new(),
        }
    }

    pub fn start(&mut self) -> Vec<TourEvent> {
        if self.state != TourState::NotStarted {
            return Vec::new();
        }
        self.waiting_for_user = false;
        self.state = TourState::Locating { stage: 0 };
        self.history.push(ChatMessage::user(
            self.lines.participant.clone(),
            self.lines.ready.clone(),
        ));
        self.schedule.schedule(self.timing.start, TourEffect::EnterStage(0));
        vec![TourEvent::TourStarted { mode: self.mode }]
    }

    /// The participant reports standing at the current artifact.
    pub fn found_it(&mut self) -> Vec<TourEvent> {
        let TourState::Locating { stage } = self.state else {
            return Vec::new();
        };
        if !self.can_confirm_location {
            return Vec::new();
        }
        let Some(artifact_id) = self.script.get(stage).map(|s| s.artifact.id.clone()) else {
            return Vec::new();
        };

        self.can_confirm_location = false;
        self.state = TourState::Exploring { stage };
        self.history.push(ChatMessage::user(
            self.lines.participant.clone(),
            self.lines.found.clone(),
        ));
        self.schedule
            .schedule(self.timing.guide_reply, TourEffect::PresentContent(stage));
        if self.lines.reply_prompt.is_some() {
            self.schedule.schedule(
                self.timing.guide_reply + self.timing.follow_up,
                TourEffect::AskForReply(stage),
            );
        }

        vec![TourEvent::ViewingStarted {
            mode: self.mode,
            artifact_id,
        }]
    }

    /// Records the participant's reply to the current stage.
    ///
    /// Blank text and replies outside the exploring phase are ignored.
    pub fn reply(&mut self, text: &str) -> Vec<TourEvent> {
        if !self.accepts_reply() {
            return Vec::new();
        }
        let Some(text) = none_if_blank(text) else {
            return Vec::new();
        };
        let Some(artifact_id) = self.current_artifact().map(|a| a.id.clone()) else {
            return Vec::new();
        };

        self.history
            .push(ChatMessage::user(self.lines.participant.clone(), text));
        self.has_replied = true;
        self.hide_reminder();

        vec![TourEvent::ReplySubmitted {
            mode: self.mode,
            artifact_id,
            text: text.to_string(),
        }]
    }

    /// "Finished" - move to the next stage, or end the tour after the last one.
    ///
    /// Before a reply this only shows the reminder.
    pub fn advance(&mut self) -> Vec<TourEvent> {
        let TourState::Exploring { stage } = self.state else {
            return Vec::new();
        };

        if !self.has_replied {
            if !self.waiting_for_user {
                return Vec::new();
            }
            self.schedule
                .retain(|effect| *effect != TourEffect::DismissReminder);
            self.reminder_visible = true;
            self.schedule
                .schedule(self.timing.reminder, TourEffect::DismissReminder);
            return vec![TourEvent::ReminderShown];
        }

        self.waiting_for_user = false;
        self.has_replied = false;
        self.hide_reminder();

        let mut events = Vec::new();
        if let Some(artifact) = self.script.get(stage) {
            events.push(TourEvent::ViewingEnded {
                mode: self.mode,
                artifact_id: artifact.artifact.id.clone(),
            });
        }

        let next = stage + 1;
        if next < self.script.len() {
            self.history.push(ChatMessage::user(
                self.lines.participant.clone(),
                self.lines.move_on.clone(),
            ));
            let ack = ChatMessage::guide(
                self.lines.narrator.clone(),
                self.lines.acknowledgement.clone(),
            );
            self.schedule
                .schedule(self.timing.acknowledgement, TourEffect::Say(ack));
            self.schedule.schedule(
                self.timing.acknowledgement + self.timing.next_stage,
                TourEffect::EnterStage(next),
            );
        } else {
            events.extend(self.complete());
        }
        events
    }

    // =========================================================================
    // Virtual time
    // =========================================================================

    /// Moves virtual time forward by `elapsed`, applying every effect that
    /// comes due, including effects scheduled by earlier ones.
    pub fn advance_by(&mut self, elapsed: Duration) -> Vec<TourEvent> {
        let deadline = self.schedule.now() + elapsed;
        let mut events = Vec::new();
        while let Some(effect) = self.schedule.pop_due(deadline) {
            events.extend(self.apply(effect));
        }
        self.schedule.advance_clock_to(deadline);
        events
    }

    /// Applies every pending effect, however far in the future.
    pub fn settle(&mut self) -> Vec<TourEvent> {
        let mut events = Vec::new();
        while let Some(effect) = self.schedule.pop_due(Duration::MAX) {
            events.extend(self.apply(effect));
        }
        events
    }

    /// Time until the next pending effect, or `None` when idle.
    pub fn next_effect_in(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.schedule.is_idle()
    }

    /// Drops every pending effect; used when the tour view goes away.
    pub fn cancel_pending(&mut self) {
        self.schedule.clear();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, effect: TourEffect) -> Vec<TourEvent> {
        match effect {
            TourEffect::Say(message) => {
                self.history.push(message);
                Vec::new()
            }
            TourEffect::EnterStage(index) => {
                self.history.push(ChatMessage::divider());
                if index < self.script.len() {
                    self.current_stage = index;
                    self.begin_stage(index);
                    Vec::new()
                } else {
                    self.complete()
                }
            }
            TourEffect::RevealIntroCard(index) => {
                if self.state == (TourState::Locating { stage: index }) {
                    if let Some(stage) = self.script.get(index) {
                        self.history.push(ChatMessage::intro_card(stage.artifact.clone()));
                        self.can_confirm_location = true;
                    }
                }
                Vec::new()
            }
            TourEffect::PresentContent(index) => {
                if self.state == (TourState::Exploring { stage: index }) {
                    if let Some(stage) = self.script.get(index) {
                        let message =
                            ChatMessage::guide(self.stage_speaker(stage), stage.content.content.clone())
                                .with_contributors(stage.content.contributing_users.clone());
                        self.history.push(message);
                        if self.lines.reply_prompt.is_none() {
                            self.waiting_for_user = true;
                        }
                    }
                }
                Vec::new()
            }
            TourEffect::AskForReply(index) => {
                if self.state == (TourState::Exploring { stage: index }) {
                    if let (Some(stage), Some(prompt)) =
                        (self.script.get(index), self.lines.reply_prompt.clone())
                    {
                        let question = ChatMessage::guide(self.stage_speaker(stage), prompt);
                        self.history.push(question);
                        self.waiting_for_user = true;
                    }
                }
                Vec::new()
            }
            TourEffect::DismissReminder => {
                if self.reminder_visible {
                    self.reminder_visible = false;
                    vec![TourEvent::ReminderDismissed]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Resets per-stage flags and queues the transition line and intro card.
    fn begin_stage(&mut self, index: usize) {
        self.state = TourState::Locating { stage: index };
        self.can_confirm_location = false;
        self.waiting_for_user = false;
        self.has_replied = false;

        let Some(stage) = self.script.get(index) else {
            return;
        };
        let mut card_delay = self.timing.guide_reply;
        if let Some(transition) = stage.transition_text() {
            let message = ChatMessage::guide(self.stage_speaker(stage), transition);
            self.schedule
                .schedule(self.timing.guide_reply, TourEffect::Say(message));
            card_delay += self.timing.transition_read;
        }
        self.schedule
            .schedule(card_delay, TourEffect::RevealIntroCard(index));
    }

    fn complete(&mut self) -> Vec<TourEvent> {
        self.state = TourState::Complete;
        self.can_confirm_location = false;
        self.waiting_for_user = false;
        let closing = ChatMessage::guide(self.lines.narrator.clone(), self.lines.closing.clone());
        self.schedule
            .schedule(self.timing.closing, TourEffect::Say(closing));
        vec![TourEvent::TourCompleted { mode: self.mode }]
    }

    fn hide_reminder(&mut self) {
        self.reminder_visible = false;
        self.schedule
            .retain(|effect| *effect != TourEffect::DismissReminder);
    }

    fn stage_speaker(&self, stage: &ScriptStage) -> String {
        match self.mode {
            TourMode::FollowMe => none_if_blank(&stage.content.speaker)
                .unwrap_or(&self.lines.narrator)
                .to_string(),
            TourMode::CollectiveStory => self.lines.narrator.clone(),
        }
    }
}
