//! Persisted tour progress and the states derived from it

use serde::{Deserialize, Serialize};

use crate::entities::{ChatMessage, MessageKind};

/// What the session store keeps for a guided tour.
///
/// The phase is not stored; it is inferred from the last message on resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeState {
    pub history: Vec<ChatMessage>,
    pub current_stage: usize,
    pub is_tour_complete: bool,
}

impl NarrativeState {
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// More than the welcome message has been recorded.
    pub fn has_started(&self) -> bool {
        self.history.len() > 1
    }

    pub fn last_kind(&self) -> Option<MessageKind> {
        self.history.last().map(|message| message.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourPhase {
    /// Looking for the artifact in the gallery
    Locating,
    /// At the artifact, reading and replying
    Exploring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TourState {
    NotStarted,
    Locating { stage: usize },
    Exploring { stage: usize },
    Complete,
}

impl TourState {
    pub fn phase(&self) -> Option<TourPhase> {
        match self {
            Self::Locating { .. } => Some(TourPhase::Locating),
            Self::Exploring { .. } => Some(TourPhase::Exploring),
            Self::NotStarted | Self::Complete => None,
        }
    }

    pub fn stage(&self) -> Option<usize> {
        match self {
            Self::Locating { stage } | Self::Exploring { stage } => Some(*stage),
            Self::NotStarted | Self::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}
