//! ContentItem entity - one piece of commentary about an artifact
//!
//! Items come either from the authored content file or from participant
//! submissions. Once created they are never mutated.

use serde::{Deserialize, Serialize};

use crate::{Artifact, ArtifactId, ModeType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub artifact_id: ArtifactId,
    pub mode: ModeType,
    /// Display name; several contributors are joined with ", "
    pub speaker: String,
    /// The commentary text
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Set for items the current participant submitted
    #[serde(default)]
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributing_users: Vec<String>,
    /// Topic title used by the comment board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Spoken by the guide before the artifact is introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_text: Option<String>,
}

impl ContentItem {
    pub fn new(
        id: impl Into<String>,
        artifact_id: impl Into<ArtifactId>,
        mode: ModeType,
        speaker: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            artifact_id: artifact_id.into(),
            mode,
            speaker: speaker.into(),
            content: content.into(),
            timestamp: None,
            avatar_url: None,
            is_user: false,
            contributing_users: Vec::new(),
            topic: None,
            transition_text: None,
        }
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_contributors(mut self, users: Vec<String>) -> Self {
        self.contributing_users = users;
        self
    }

    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_transition(mut self, transition_text: Option<String>) -> Self {
        self.transition_text = transition_text;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Marks the item as written by the current participant.
    pub fn submitted_by_user(mut self) -> Self {
        self.is_user = true;
        self
    }
}

/// One (artifact, content) pair of a tour script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStage {
    pub artifact: Artifact,
    pub content: ContentItem,
}

impl ScriptStage {
    pub fn new(artifact: Artifact, content: ContentItem) -> Self {
        Self { artifact, content }
    }

    pub fn transition_text(&self) -> Option<&str> {
        self.content
            .transition_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_transition_text_counts_as_absent() {
        let artifact = Artifact::new("ding", "Bronze Ding", "ding.png");
        let content = ContentItem::new("c1", "ding", ModeType::FollowMe, "Guide", "text")
            .with_transition(Some("   ".to_string()));
        let stage = ScriptStage::new(artifact, content);
        assert_eq!(stage.transition_text(), None);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let item = ContentItem::new("c1", "ding", ModeType::CrowdChat, "Ana", "Lovely");
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["artifactId"], "ding");
        assert_eq!(json["mode"], "crowd_chat");
        assert!(json.get("topic").is_none());
        assert!(json.get("contributingUsers").is_none());
    }
}
