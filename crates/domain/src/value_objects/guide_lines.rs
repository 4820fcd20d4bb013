//! Fixed lines spoken during a guided tour

use crate::entities::CURRENT_USER_NAME;
use crate::TourMode;

/// Narrator shown for Follow-Me when the content names no guide.
pub const DEFAULT_GUIDE_NAME: &str = "Follow Me";

/// Narrator of Collective-Story tours.
pub const COLLECTIVE_NARRATOR_NAME: &str = "Follow Them";

/// Everything the tour says that does not come from the content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideLines {
    /// Speaker of welcome, acknowledgement and closing lines
    pub narrator: String,
    /// Name on the participant's own messages
    pub participant: String,
    pub welcome: String,
    pub ready: String,
    pub found: String,
    pub move_on: String,
    /// Asked after the stage content. `None` means the content itself invites a reply.
    pub reply_prompt: Option<String>,
    pub acknowledgement: String,
    pub closing: String,
    pub reminder: String,
}

impl GuideLines {
    pub fn follow_me(guide_name: impl Into<String>) -> Self {
        Self {
            narrator: guide_name.into(),
            welcome: "Welcome to the tour! Come and explore a few important artifacts with me.".to_string(),
            reply_prompt: Some("Anything you'd like to say?".to_string()),
            acknowledgement: "Thanks for sharing, what an interesting thought! I'll pass it on to the next visitor.".to_string(),
            ..Self::common()
        }
    }

    pub fn collective_story() -> Self {
        Self {
            narrator: COLLECTIVE_NARRATOR_NAME.to_string(),
            welcome: "Welcome to the tour! Let's see what everyone has said about these artifacts.".to_string(),
            reply_prompt: None,
            acknowledgement: "Thank you for sharing! I'll add your thoughts to my summary for those who come after.".to_string(),
            ..Self::common()
        }
    }

    pub fn for_mode(mode: TourMode, guide_name: impl Into<String>) -> Self {
        match mode {
            TourMode::FollowMe => Self::follow_me(guide_name),
            TourMode::CollectiveStory => Self::collective_story(),
        }
    }

    fn common() -> Self {
        Self {
            narrator: DEFAULT_GUIDE_NAME.to_string(),
            participant: CURRENT_USER_NAME.to_string(),
            welcome: String::new(),
            ready: "I'm ready!".to_string(),
            found: "I found it!".to_string(),
            move_on: "Let's go see the next artifact!".to_string(),
            reply_prompt: None,
            acknowledgement: String::new(),
            closing: "That's the end of this tour. Thank you for walking with us.".to_string(),
            reminder: "Share your thoughts before moving on".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_follow_me_asks_a_question() {
        assert!(GuideLines::follow_me("Ana").reply_prompt.is_some());
        assert!(GuideLines::collective_story().reply_prompt.is_none());
    }

    #[test]
    fn for_mode_uses_fixed_narrator_for_collective_story() {
        let lines = GuideLines::for_mode(TourMode::CollectiveStory, "Ana");
        assert_eq!(lines.narrator, COLLECTIVE_NARRATOR_NAME);
        assert_eq!(GuideLines::for_mode(TourMode::FollowMe, "Ana").narrator, "Ana");
    }
}
