//! Content Repository - read-only lookups over the authored content
//!
//! Every read is a pure function of the snapshot loaded at startup. Missing
//! data yields an empty list, never an error.

use ugclab_domain::value_objects::{COLLECTIVE_NARRATOR_NAME, DEFAULT_GUIDE_NAME};
use ugclab_domain::{
    avatar_url_for, Artifact, ArtifactId, ContentItem, ModeType, ScriptStage, TourMode,
    UserProfile, SPRITE_NAME,
};

use crate::application::dto::{ContentFile, RouteEntry};

#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    file: ContentFile,
}

impl ContentRepository {
    pub fn new(file: ContentFile) -> Self {
        Self { file }
    }

    /// Artifacts in route order, or by id when no route is authored.
    pub fn list_artifacts(&self) -> Vec<Artifact> {
        if self.file.tour_route.is_empty() {
            return self
                .file
                .metadata
                .keys()
                .filter_map(|id| self.artifact(&ArtifactId::new(id.as_str())))
                .collect();
        }

        self.file
            .tour_route
            .iter()
            .map(|entry| {
                let id = ArtifactId::new(entry.id.as_str());
                self.artifact(&id).unwrap_or_else(|| Artifact::unknown(id))
            })
            .collect()
    }

    pub fn artifact(&self, id: &ArtifactId) -> Option<Artifact> {
        self.file
            .metadata
            .get(id.as_str())
            .map(|meta| Artifact::new(id.clone(), meta.offical_name.clone(), meta.avatar_img.clone()))
    }

    pub fn content_for(&self, artifact_id: &ArtifactId, mode: ModeType) -> Vec<ContentItem> {
        self.file
            .items(artifact_id.as_str(), mode.content_key())
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let (speaker, avatar_key, contributors) = match &raw.user {
                    Some(users) => (
                        users.joined(),
                        users.first().unwrap_or(SPRITE_NAME).to_string(),
                        users.names(),
                    ),
                    None => (SPRITE_NAME.to_string(), SPRITE_NAME.to_string(), Vec::new()),
                };

                ContentItem::new(
                    format!("{}-{}-{}", artifact_id, mode, index),
                    artifact_id.clone(),
                    mode,
                    speaker,
                    raw.text.clone(),
                )
                .with_avatar(avatar_url_for(&avatar_key))
                .with_contributors(contributors)
                .with_topic(raw.topic.clone().filter(|t| !t.trim().is_empty()))
            })
            .collect()
    }

    /// Ordered stages of a tour. Route stops without metadata or without
    /// content for the tour's mode are skipped.
    pub fn script_for(&self, mode: TourMode) -> Vec<ScriptStage> {
        self.file
            .tour_route
            .iter()
            .filter_map(|entry| self.stage_for(entry, mode))
            .collect()
    }

    fn stage_for(&self, entry: &RouteEntry, mode: TourMode) -> Option<ScriptStage> {
        let id = ArtifactId::new(entry.id.as_str());
        let artifact = self.artifact(&id)?;
        let raw = self.file.items(&entry.id, mode.mode().content_key()).first()?;
        let transitions = entry.transition_text.as_ref();

        let content = match mode {
            TourMode::FollowMe => {
                let speaker = raw
                    .user
                    .as_ref()
                    .and_then(|u| u.first())
                    .unwrap_or(DEFAULT_GUIDE_NAME)
                    .to_string();
                ContentItem::new(
                    format!("script-{}", id),
                    id,
                    ModeType::FollowMe,
                    speaker.clone(),
                    raw.text.clone(),
                )
                .with_avatar(avatar_url_for(&speaker))
                .with_transition(transitions.and_then(|t| t.follow_me.clone()))
            }
            TourMode::CollectiveStory => {
                let contributors = raw
                    .user
                    .as_ref()
                    .map(|u| u.names())
                    .unwrap_or_else(|| vec![COLLECTIVE_NARRATOR_NAME.to_string()]);
                ContentItem::new(
                    format!("script-{}-col", id),
                    id,
                    ModeType::CollectiveStory,
                    COLLECTIVE_NARRATOR_NAME,
                    raw.text.clone(),
                )
                .with_avatar(avatar_url_for(COLLECTIVE_NARRATOR_NAME))
                .with_contributors(contributors)
                .with_transition(transitions.and_then(|t| t.collective_story.clone()))
            }
        };

        Some(ScriptStage::new(artifact, content))
    }

    /// The Follow-Me guide: first author of the first `follow-me` item,
    /// looking along the route first and then at every artifact by id.
    pub fn guide_profile(&self) -> UserProfile {
        let key = ModeType::FollowMe.content_key();
        let route_ids = self.file.tour_route.iter().map(|e| e.id.as_str());
        let all_ids = self.file.ugc_content.keys().map(String::as_str);

        route_ids
            .chain(all_ids)
            .find_map(|id| {
                self.file
                    .items(id, key)
                    .first()
                    .and_then(|raw| raw.user.as_ref())
                    .and_then(|users| users.first())
                    .map(UserProfile::named)
            })
            .unwrap_or_else(|| UserProfile::named(DEFAULT_GUIDE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> ContentRepository {
        let json = r#"{
            "metadata": {
                "ding": { "offical_name": "Bronze Ding", "avatar_img": "ding.png" },
                "vase": { "offical_name": "Celadon Vase", "avatar_img": "vase.png" },
                "zun":  { "offical_name": "Ritual Zun", "avatar_img": "zun.png" }
            },
            "ugc_content": {
                "ding": {
                    "follow-me": [ { "user": "Lin", "text": "Look at the legs." } ],
                    "collective_story": [ { "user": ["Ana", "Bo"], "text": "Everyone noticed the rust." } ],
                    "comment_board": [
                        { "user": "Ana", "text": "Heavy!", "topic": "Weight" },
                        { "text": "Anonymous note", "topic": "  " }
                    ]
                },
                "vase": {
                    "collective_story": [ { "text": "Quiet glaze." } ]
                }
            },
            "tour_route": [
                { "id": "ding", "transition_text": { "follow_me": "First, the ding.", "collective_story": "People gathered here." } },
                { "id": "ghost" },
                { "id": "vase" }
            ]
        }"#;
        ContentRepository::new(serde_json::from_str(json).expect("content"))
    }

    mod artifacts {
        use super::*;

        #[test]
        fn route_order_with_unknown_placeholders() {
            let names: Vec<_> = repository()
                .list_artifacts()
                .into_iter()
                .map(|a| a.name)
                .collect();
            assert_eq!(names, vec!["Bronze Ding", "Unknown", "Celadon Vase"]);
        }

        #[test]
        fn without_route_lists_metadata_by_id() {
            let mut repo = repository();
            repo.file.tour_route.clear();
            let ids: Vec<_> = repo
                .list_artifacts()
                .into_iter()
                .map(|a| a.id.to_string())
                .collect();
            assert_eq!(ids, vec!["ding", "vase", "zun"]);
        }

        #[test]
        fn empty_repository_has_nothing() {
            let repo = ContentRepository::default();
            assert!(repo.list_artifacts().is_empty());
            assert!(repo.script_for(TourMode::FollowMe).is_empty());
            assert!(repo
                .content_for(&ArtifactId::new("ding"), ModeType::CrowdChat)
                .is_empty());
        }
    }

    mod content {
        use super::*;

        #[test]
        fn items_get_stable_ids_speakers_and_topics() {
            let items = repository().content_for(&ArtifactId::new("ding"), ModeType::CommentBoard);

            assert_eq!(items.len(), 2);
            assert_eq!(items[0].id, "ding-comment_board-0");
            assert_eq!(items[0].speaker, "Ana");
            assert_eq!(items[0].topic.as_deref(), Some("Weight"));
            assert_eq!(items[0].avatar_url, Some(avatar_url_for("Ana")));
            assert_eq!(items[1].speaker, SPRITE_NAME);
            assert_eq!(items[1].topic, None);
            assert!(items[1].contributing_users.is_empty());
        }

        #[test]
        fn co_authors_are_joined() {
            let items =
                repository().content_for(&ArtifactId::new("ding"), ModeType::CollectiveStory);
            assert_eq!(items[0].speaker, "Ana, Bo");
            assert_eq!(items[0].contributing_users, vec!["Ana", "Bo"]);
            assert_eq!(items[0].avatar_url, Some(avatar_url_for("Ana")));
        }

        #[test]
        fn follow_me_reads_the_hyphenated_key() {
            let items = repository().content_for(&ArtifactId::new("ding"), ModeType::FollowMe);
            assert_eq!(items[0].id, "ding-follow_me-0");
            assert_eq!(items[0].content, "Look at the legs.");
        }
    }

    mod scripts {
        use super::*;

        #[test]
        fn follow_me_skips_stops_without_content() {
            let script = repository().script_for(TourMode::FollowMe);

            assert_eq!(script.len(), 1);
            assert_eq!(script[0].artifact.name, "Bronze Ding");
            assert_eq!(script[0].content.speaker, "Lin");
            assert_eq!(script[0].transition_text(), Some("First, the ding."));
        }

        #[test]
        fn collective_story_uses_the_narrator() {
            let script = repository().script_for(TourMode::CollectiveStory);

            assert_eq!(script.len(), 2);
            assert_eq!(script[0].content.speaker, COLLECTIVE_NARRATOR_NAME);
            assert_eq!(script[0].content.contributing_users, vec!["Ana", "Bo"]);
            assert_eq!(script[1].content.id, "script-vase-col");
            assert_eq!(
                script[1].content.contributing_users,
                vec![COLLECTIVE_NARRATOR_NAME]
            );
            assert_eq!(script[1].transition_text(), None);
        }

        #[test]
        fn guide_profile_comes_from_follow_me_content() {
            assert_eq!(repository().guide_profile(), UserProfile::named("Lin"));
            assert_eq!(
                ContentRepository::default().guide_profile().name,
                DEFAULT_GUIDE_NAME
            );
        }
    }
}
