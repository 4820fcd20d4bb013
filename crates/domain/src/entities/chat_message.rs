//! ChatMessage entity - one entry of a tour transcript
//!
//! Transcripts are append-only and ordered by emission time.

use serde::{Deserialize, Serialize};

use crate::{Artifact, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Card introducing the artifact the participant should find
    IntroBubble,
    /// Spoken by the guide or narrator
    GuideText,
    /// Spoken by the participant
    UserText,
    /// Visual separator between stages
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributing_users: Vec<String>,
}

impl ChatMessage {
    fn empty(kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            kind,
            content: None,
            artifact: None,
            speaker: None,
            contributing_users: Vec::new(),
        }
    }

    pub fn intro_card(artifact: Artifact) -> Self {
        Self {
            artifact: Some(artifact),
            ..Self::empty(MessageKind::IntroBubble)
        }
    }

    pub fn guide(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            speaker: Some(speaker.into()),
            ..Self::empty(MessageKind::GuideText)
        }
    }

    pub fn user(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            speaker: Some(speaker.into()),
            ..Self::empty(MessageKind::UserText)
        }
    }

    pub fn divider() -> Self {
        Self::empty(MessageKind::Divider)
    }

    pub fn with_contributors(mut self, users: Vec<String>) -> Self {
        self.contributing_users = users;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_under_type_key() {
        let msg = ChatMessage::guide("Guide", "Hello");
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["type"], "guide_text");
        assert_eq!(json["content"], "Hello");
        assert!(json.get("artifact").is_none());
    }

    #[test]
    fn transcript_round_trips_through_json() {
        let history = vec![
            ChatMessage::guide("Guide", "Welcome"),
            ChatMessage::divider(),
            ChatMessage::intro_card(Artifact::new("ding", "Bronze Ding", "ding.png")),
        ];
        let json = serde_json::to_string(&history).expect("serialize");
        let back: Vec<ChatMessage> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, history);
    }
}
