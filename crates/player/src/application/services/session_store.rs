//! Session Store - everything one participant has produced this visit
//!
//! Lives exactly as long as the participant's session. Comment-board and
//! crowd-chat submissions are kept per artifact; each tour mode has a single
//! slot for its narrative progress.

use std::collections::HashMap;

use ugclab_domain::{
    ArtifactId, ContentItem, MessageId, ModeType, NarrativeState, ParticipantId, TourMode,
    UserProfile,
};

#[derive(Debug, Clone)]
pub struct SessionStore {
    participant_id: Option<ParticipantId>,
    current_user: UserProfile,
    comment_board: HashMap<ArtifactId, Vec<ContentItem>>,
    crowd_chat: HashMap<ArtifactId, Vec<ContentItem>>,
    narratives: HashMap<TourMode, NarrativeState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            participant_id: None,
            current_user: UserProfile::current_user(),
            comment_board: HashMap::new(),
            crowd_chat: HashMap::new(),
            narratives: HashMap::new(),
        }
    }

    pub fn set_participant(&mut self, participant_id: ParticipantId) {
        self.participant_id = Some(participant_id);
    }

    pub fn participant_id(&self) -> Option<&ParticipantId> {
        self.participant_id.as_ref()
    }

    pub fn current_user(&self) -> &UserProfile {
        &self.current_user
    }

    /// A new item authored by the current user.
    pub fn user_item(&self, artifact_id: &ArtifactId, mode: ModeType, text: &str) -> ContentItem {
        ContentItem::new(
            format!("user-{}", MessageId::new()),
            artifact_id.clone(),
            mode,
            self.current_user.name.clone(),
            text,
        )
        .with_avatar(self.current_user.avatar_url.clone())
        .submitted_by_user()
    }

    // =========================================================================
    // Comment board (newest first)
    // =========================================================================

    pub fn add_comment(&mut self, artifact_id: &ArtifactId, item: ContentItem) {
        let item = self.with_user_avatar(item);
        self.comment_board
            .entry(artifact_id.clone())
            .or_default()
            .insert(0, item);
    }

    pub fn comments(&self, artifact_id: &ArtifactId) -> &[ContentItem] {
        self.comment_board
            .get(artifact_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // =========================================================================
    // Crowd chat (oldest first)
    // =========================================================================

    pub fn add_chat_message(&mut self, artifact_id: &ArtifactId, item: ContentItem) {
        let item = self.with_user_avatar(item);
        self.crowd_chat
            .entry(artifact_id.clone())
            .or_default()
            .push(item);
    }

    pub fn chat_messages(&self, artifact_id: &ArtifactId) -> &[ContentItem] {
        self.crowd_chat
            .get(artifact_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // =========================================================================
    // Tour progress
    // =========================================================================

    pub fn save_narrative(&mut self, mode: TourMode, state: NarrativeState) {
        self.narratives.insert(mode, state);
    }

    pub fn narrative(&self, mode: TourMode) -> Option<&NarrativeState> {
        self.narratives.get(&mode)
    }

    fn with_user_avatar(&self, mut item: ContentItem) -> ContentItem {
        if item.avatar_url.as_deref().map_or(true, str::is_empty) {
            item.avatar_url = Some(self.current_user.avatar_url.clone());
        }
        item
    }
}
