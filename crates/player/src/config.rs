//! Player configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_CONTENT_PATH: &str = "public/data/ugc_data.json";

const DEFAULT_COLLECTOR_TIMEOUT_MS: u64 = 5_000;
/// Three minutes of mandatory viewing per main-mode artifact.
const DEFAULT_TASK_LOCK_MS: u64 = 180_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Base URL the `/data/...` routes hang off
    pub collector_url: String,
    pub content_path: PathBuf,
    pub collector_timeout: Duration,
    pub task_lock: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            collector_url: DEFAULT_COLLECTOR_URL.to_string(),
            content_path: PathBuf::from(DEFAULT_CONTENT_PATH),
            collector_timeout: Duration::from_millis(DEFAULT_COLLECTOR_TIMEOUT_MS),
            task_lock: Duration::from_millis(DEFAULT_TASK_LOCK_MS),
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        Self {
            collector_url: lookup("COLLECTOR_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.collector_url),
            content_path: lookup("CONTENT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.content_path),
            collector_timeout: millis("COLLECTOR_TIMEOUT_MS").unwrap_or(defaults.collector_timeout),
            task_lock: millis("TASK_LOCK_MS").unwrap_or(defaults.task_lock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = PlayerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.collector_url, "http://localhost:3001/api");
        assert_eq!(config.task_lock, Duration::from_secs(180));
    }

    #[test]
    fn collector_url_loses_trailing_slash() {
        let config = PlayerConfig::from_lookup(lookup(&[("COLLECTOR_URL", "https://lab.example/api/")]));
        assert_eq!(config.collector_url, "https://lab.example/api");
    }

    #[test]
    fn durations_parse_as_millis() {
        let config = PlayerConfig::from_lookup(lookup(&[
            ("COLLECTOR_TIMEOUT_MS", "250"),
            ("TASK_LOCK_MS", "oops"),
        ]));
        assert_eq!(config.collector_timeout, Duration::from_millis(250));
        assert_eq!(config.task_lock, Duration::from_millis(180_000));
    }
}
