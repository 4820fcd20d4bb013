//! The authored content document (`ugc_data.json`).
//!
//! ```json
//! {
//!   "metadata":    { "<id>": { "offical_name": "...", "avatar_img": "..." } },
//!   "ugc_content": { "<id>": { "follow-me": [ { "user": "Ana", "text": "..." } ] } },
//!   "tour_route":  [ { "id": "<id>", "transition_text": { "follow_me": "..." } } ]
//! }
//! ```
//!
//! Every section is optional so a partial document still loads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub metadata: BTreeMap<String, ArtifactMeta>,
    /// artifact id -> mode key -> items
    #[serde(default)]
    pub ugc_content: BTreeMap<String, BTreeMap<String, Vec<RawContent>>>,
    #[serde(default)]
    pub tour_route: Vec<RouteEntry>,
}

impl ContentFile {
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.ugc_content.is_empty() && self.tour_route.is_empty()
    }

    /// Items authored for one artifact under one mode key.
    pub fn items(&self, artifact_id: &str, mode_key: &str) -> &[RawContent] {
        self.ugc_content
            .get(artifact_id)
            .and_then(|modes| modes.get(mode_key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    // The misspelling is part of the authored format.
    #[serde(default)]
    pub offical_name: String,
    #[serde(default)]
    pub avatar_img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub user: Option<Users>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub topic: Option<String>,
}

/// A single author or a group of co-authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Users {
    One(String),
    Many(Vec<String>),
}

impl Users {
    pub fn names(&self) -> Vec<String> {
        match self {
            Users::One(name) => vec![name.clone()],
            Users::Many(names) => names.clone(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            Users::One(name) => Some(name.as_str()),
            Users::Many(names) => names.first().map(String::as_str),
        }
        .filter(|name| !name.is_empty())
    }

    /// Display form: co-authors joined with ", ".
    pub fn joined(&self) -> String {
        match self {
            Users::One(name) => name.clone(),
            Users::Many(names) => names.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub id: String,
    #[serde(default)]
    pub transition_text: Option<TransitionTexts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTexts {
    #[serde(default)]
    pub follow_me: Option<String>,
    #[serde(default)]
    pub collective_story: Option<String>,
}
