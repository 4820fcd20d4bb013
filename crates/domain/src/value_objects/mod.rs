//! Value objects - Immutable objects defined by their attributes

mod effect_schedule;
mod guide_lines;
mod narrative_state;
mod tour_control;
mod tour_timing;

pub use effect_schedule::EffectSchedule;
pub use guide_lines::{GuideLines, COLLECTIVE_NARRATOR_NAME, DEFAULT_GUIDE_NAME};
pub use narrative_state::{NarrativeState, TourPhase, TourState};
pub use tour_control::{ControlAction, TourControl};
pub use tour_timing::TourTiming;
