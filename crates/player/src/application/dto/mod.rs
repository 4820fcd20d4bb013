//! Data transfer objects
//!
//! Shapes of external documents the application reads. Infrastructure
//! deserializes into them; services turn them into domain entities.

pub mod content_file;

pub use content_file::{ArtifactMeta, ContentFile, RawContent, RouteEntry, TransitionTexts, Users};
