//! Viewing modes of the experiment
//!
//! The four modes cross two factors: who wrote the commentary (one person or
//! a crowd) and how it is presented (discrete comments or a coherent tour).
//!
//! | | Discrete | Coherent |
//! |---|---|---|
//! | Individual | Comment Board | Follow Me |
//! | Collective | Crowd Chat | Collective Story |

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A UGC viewing mode a participant can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeType {
    CommentBoard,
    FollowMe,
    CrowdChat,
    CollectiveStory,
}

impl ModeType {
    /// Main-mode rotation; participant `n` gets `ROTATION[(n - 1) % 4]`.
    pub const ROTATION: [ModeType; 4] = [
        ModeType::CommentBoard,
        ModeType::FollowMe,
        ModeType::CrowdChat,
        ModeType::CollectiveStory,
    ];

    /// Wire value, also used as the `mode` column of exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeType::CommentBoard => "comment_board",
            ModeType::FollowMe => "follow_me",
            ModeType::CrowdChat => "crowd_chat",
            ModeType::CollectiveStory => "collective_story",
        }
    }

    /// Key of this mode's list inside the content file.
    ///
    /// Follow Me is stored under a hyphenated key in authored content.
    pub fn content_key(&self) -> &'static str {
        match self {
            ModeType::FollowMe => "follow-me",
            other => other.as_str(),
        }
    }

    /// Linear guided tours skip the artifact list and use the narrative engine.
    pub fn is_tour(&self) -> bool {
        self.tour_mode().is_some()
    }

    pub fn tour_mode(&self) -> Option<TourMode> {
        match self {
            ModeType::FollowMe => Some(TourMode::FollowMe),
            ModeType::CollectiveStory => Some(TourMode::CollectiveStory),
            ModeType::CommentBoard | ModeType::CrowdChat => None,
        }
    }

    /// Main mode assigned to the participant with the given 1-based number.
    pub fn assigned_for(number: u64) -> Option<ModeType> {
        if number == 0 {
            return None;
        }
        let index = ((number - 1) % Self::ROTATION.len() as u64) as usize;
        Some(Self::ROTATION[index])
    }
}

impl fmt::Display for ModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "comment_board" => Ok(ModeType::CommentBoard),
            "follow_me" => Ok(ModeType::FollowMe),
            "crowd_chat" => Ok(ModeType::CrowdChat),
            "collective_story" => Ok(ModeType::CollectiveStory),
            other => Err(DomainError::parse(format!("Unknown mode: {}", other))),
        }
    }
}

/// The two modes driven by the narrative engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourMode {
    /// A single guide walks the participant through the route.
    FollowMe,
    /// A narrator relays what earlier visitors said about each artifact.
    CollectiveStory,
}

impl TourMode {
    pub fn mode(&self) -> ModeType {
        match self {
            TourMode::FollowMe => ModeType::FollowMe,
            TourMode::CollectiveStory => ModeType::CollectiveStory,
        }
    }
}

impl From<TourMode> for ModeType {
    fn from(value: TourMode) -> Self {
        value.mode()
    }
}

impl fmt::Display for TourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_assigns_modes_by_participant_number() {
        assert_eq!(ModeType::assigned_for(1), Some(ModeType::CommentBoard));
        assert_eq!(ModeType::assigned_for(2), Some(ModeType::FollowMe));
        assert_eq!(ModeType::assigned_for(3), Some(ModeType::CrowdChat));
        assert_eq!(ModeType::assigned_for(4), Some(ModeType::CollectiveStory));
        assert_eq!(ModeType::assigned_for(5), Some(ModeType::CommentBoard));
        assert_eq!(ModeType::assigned_for(0), None);
    }

    #[test]
    fn parses_wire_and_content_keys() {
        assert_eq!("follow_me".parse::<ModeType>(), Ok(ModeType::FollowMe));
        assert_eq!("follow-me".parse::<ModeType>(), Ok(ModeType::FollowMe));
        assert_eq!(" Crowd_Chat ".parse::<ModeType>(), Ok(ModeType::CrowdChat));
        assert!("gallery".parse::<ModeType>().is_err());
    }

    #[test]
    fn content_key_differs_only_for_follow_me() {
        assert_eq!(ModeType::FollowMe.content_key(), "follow-me");
        assert_eq!(ModeType::CollectiveStory.content_key(), "collective_story");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ModeType::CollectiveStory).expect("serialize");
        assert_eq!(json, "\"collective_story\"");
    }

    #[test]
    fn only_tours_have_a_tour_mode() {
        assert!(ModeType::FollowMe.is_tour());
        assert!(ModeType::CollectiveStory.is_tour());
        assert!(!ModeType::CommentBoard.is_tour());
        assert_eq!(TourMode::CollectiveStory.mode(), ModeType::CollectiveStory);
    }
}
