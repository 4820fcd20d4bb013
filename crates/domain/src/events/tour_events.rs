//! TourNarrative mutation outcomes.

use serde::{Deserialize, Serialize};

use crate::{ArtifactId, TourMode};

/// Something a tour action or timer did that the outside world cares about.
///
/// The runtime maps these onto telemetry (dwell timers, submissions) and the
/// task gate; the aggregate itself has no side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TourEvent {
    TourStarted {
        mode: TourMode,
    },
    /// The participant confirmed they are standing at the artifact
    ViewingStarted {
        mode: TourMode,
        artifact_id: ArtifactId,
    },
    /// The participant moved on from the artifact
    ViewingEnded {
        mode: TourMode,
        artifact_id: ArtifactId,
    },
    ReplySubmitted {
        mode: TourMode,
        artifact_id: ArtifactId,
        text: String,
    },
    /// "Finished" pressed before replying
    ReminderShown,
    ReminderDismissed,
    TourCompleted {
        mode: TourMode,
    },
}
