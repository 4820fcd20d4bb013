//! Reads the authored content document from disk.

use std::path::Path;

use crate::application::dto::ContentFile;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Malformed content file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub async fn load_content(path: &Path) -> Result<ContentFile, ContentError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ContentError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads the content file, degrading to an empty document on any failure so
/// the participant still gets a working (if empty) app.
pub async fn load_content_or_empty(path: &Path) -> ContentFile {
    match load_content(path).await {
        Ok(content) => {
            tracing::info!(
                path = %path.display(),
                artifacts = content.metadata.len(),
                route_stops = content.tour_route.len(),
                "Loaded content"
            );
            content
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load content, using empty snapshot");
            ContentFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_a_valid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ugc_data.json");
        std::fs::write(
            &path,
            r#"{ "metadata": { "ding": { "offical_name": "Bronze Ding", "avatar_img": "ding.png" } } }"#,
        )
        .expect("write");

        let content = load_content(&path).await.expect("load");
        assert_eq!(content.metadata["ding"].offical_name, "Bronze Ding");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_content(&dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(ContentError::Read { .. })));
    }

    #[tokio::test]
    async fn malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ugc_data.json");
        std::fs::write(&path, "{ not json").expect("write");

        assert!(matches!(load_content(&path).await, Err(ContentError::Parse(_))));
        assert!(load_content_or_empty(&path).await.is_empty());
    }
}
