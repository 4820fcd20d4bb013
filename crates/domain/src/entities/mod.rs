//! Domain entities - Core business objects with identity

mod artifact;
mod chat_message;
mod content_item;
mod log_entry;
mod participant;

pub use artifact::Artifact;
pub use chat_message::{ChatMessage, MessageKind};
pub use content_item::{ContentItem, ScriptStage};
pub use log_entry::{DwellRecord, InputKind, LogDetails, LogEntry, LogEventType, MIN_DWELL_MS};
pub use participant::{
    avatar_url_for, ParticipantId, UserProfile, CURRENT_USER_NAME, SPRITE_NAME,
};
