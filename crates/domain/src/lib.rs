extern crate self as ugclab_domain;

pub mod aggregates;
pub mod common;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod types;
pub mod value_objects;

pub use aggregates::TourNarrative;

pub use entities::{
    avatar_url_for, Artifact, ChatMessage, ContentItem, DwellRecord, InputKind, LogDetails,
    LogEntry, LogEventType, MessageKind, ParticipantId, ScriptStage, UserProfile,
    CURRENT_USER_NAME, MIN_DWELL_MS, SPRITE_NAME,
};

pub use error::DomainError;
pub use events::TourEvent;

pub use ids::{ArtifactId, MessageId};

pub use types::{ModeType, TourMode};

pub use value_objects::{
    ControlAction, EffectSchedule, GuideLines, NarrativeState, TourControl, TourPhase, TourState,
    TourTiming,
};
