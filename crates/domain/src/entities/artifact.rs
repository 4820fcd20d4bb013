//! Artifact entity - an exhibit on the museum route

use serde::{Deserialize, Serialize};

use crate::ArtifactId;

/// A museum artifact as shown in lists and intro cards.
///
/// Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
    pub image_url: String,
}

impl Artifact {
    pub fn new(id: impl Into<ArtifactId>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
        }
    }

    /// Placeholder for a route entry whose metadata is missing.
    pub fn unknown(id: impl Into<ArtifactId>) -> Self {
        Self::new(id, "Unknown", "")
    }
}
