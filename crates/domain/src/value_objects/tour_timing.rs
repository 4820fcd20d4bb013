//! Pacing of the guided tour

use std::time::Duration;

/// Delays between tour steps.
///
/// Guide replies are paced like a person typing so the transcript reads as
/// a conversation rather than a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourTiming {
    /// From "ready" to the first stage
    pub start: Duration,
    /// Before a guide line (transition, content) or a bare intro card
    pub guide_reply: Duration,
    /// Extra reading time after a transition line, before the intro card
    pub transition_read: Duration,
    /// Between the guide's content and the follow-up question
    pub follow_up: Duration,
    /// Before the guide acknowledges "move on"
    pub acknowledgement: Duration,
    /// Between the acknowledgement and the next stage
    pub next_stage: Duration,
    /// Before the closing message
    pub closing: Duration,
    /// How long the reply reminder stays visible
    pub reminder: Duration,
}

impl Default for TourTiming {
    fn default() -> Self {
        Self {
            start: Duration::from_millis(600),
            guide_reply: Duration::from_millis(500),
            transition_read: Duration::from_millis(1500),
            follow_up: Duration::from_millis(1000),
            acknowledgement: Duration::from_millis(600),
            next_stage: Duration::from_millis(1000),
            closing: Duration::from_millis(600),
            reminder: Duration::from_millis(2000),
        }
    }
}

impl TourTiming {
    /// Every delay zero; effects still fire in order.
    pub fn instant() -> Self {
        Self {
            start: Duration::ZERO,
            guide_reply: Duration::ZERO,
            transition_read: Duration::ZERO,
            follow_up: Duration::ZERO,
            acknowledgement: Duration::ZERO,
            next_stage: Duration::ZERO,
            closing: Duration::ZERO,
            reminder: Duration::ZERO,
        }
    }
}
