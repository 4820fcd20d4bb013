//! Participant identity and display profiles

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::{DomainError, ModeType};

/// Display name of the participant in transcripts and comment lists.
pub const CURRENT_USER_NAME: &str = "Me";

/// Default speaker for unattributed commentary.
pub const SPRITE_NAME: &str = "Sprite";

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/thumbs/svg?seed=";

/// Research participant identifier, e.g. `P12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Builds the id from what the participant typed on the entry screen.
    pub fn from_input(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("participant number cannot be empty"));
        }
        Ok(Self(format!("P{}", trimmed)))
    }

    /// Wraps an id that already carries its prefix (e.g. from a request body).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part of the id, when there is one.
    pub fn number(&self) -> Option<u64> {
        self.0.strip_prefix('P').unwrap_or(&self.0).parse().ok()
    }

    pub fn assigned_main_mode(&self) -> Option<ModeType> {
        self.number().and_then(ModeType::assigned_for)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name and avatar shown next to a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub avatar_url: String,
}

impl UserProfile {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let avatar_url = avatar_url_for(&name);
        Self { name, avatar_url }
    }

    pub fn current_user() -> Self {
        Self::named(CURRENT_USER_NAME)
    }
}

/// Everything except the characters `encodeURIComponent` leaves unescaped.
const SEED_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Stable avatar URL derived from a display name.
pub fn avatar_url_for(name: &str) -> String {
    format!("{AVATAR_BASE}{}", utf8_percent_encode(name, SEED_COMPONENT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_prefixes_and_trims() {
        let id = ParticipantId::from_input(" 12 ").expect("valid");
        assert_eq!(id.as_str(), "P12");
        assert_eq!(id.number(), Some(12));
        assert_eq!(id.assigned_main_mode(), Some(ModeType::CommentBoard));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            ParticipantId::from_input("  "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn non_numeric_ids_have_no_main_mode() {
        let id = ParticipantId::from_input("pilot").expect("valid");
        assert_eq!(id.number(), None);
        assert_eq!(id.assigned_main_mode(), None);
    }

    #[test]
    fn avatar_urls_are_percent_encoded() {
        assert!(avatar_url_for("Ana").ends_with("seed=Ana"));
        assert!(avatar_url_for("A B").ends_with("seed=A%20B"));
        assert!(avatar_url_for("Bo's (2)!").ends_with("seed=Bo's%20(2)!"));
        assert!(avatar_url_for("Zoë&Li").ends_with("seed=Zo%C3%AB%26Li"));
        assert_eq!(avatar_url_for("Me"), UserProfile::current_user().avatar_url);
    }
}
