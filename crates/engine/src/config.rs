//! Collector configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::infrastructure::json_store::STORE_FILE_NAME;

const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// `*` or a comma-separated origin list; `None` allows any origin
    pub cors_allowed_origins: Option<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("data"),
            cors_allowed_origins: None,
        }
    }
}

impl CollectorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port,
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
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
    fn defaults_match_original_deployment() {
        let config = CollectorConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CollectorConfig::default());
        assert_eq!(config.port, 3001);
        assert_eq!(config.store_path(), PathBuf::from("data").join("participants.json"));
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = CollectorConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert_eq!(config.port, 8080);

        let config =
            CollectorConfig::from_lookup(lookup(&[("SERVER_PORT", "9000"), ("PORT", "8080")]));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn unparseable_port_uses_default() {
        let config = CollectorConfig::from_lookup(lookup(&[("SERVER_PORT", "http")]));
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn blank_cors_is_unset() {
        let config = CollectorConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "  ")]));
        assert_eq!(config.cors_allowed_origins, None);
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = CollectorConfig::from_lookup(lookup(&[("SERVER_HOST", "127.0.0.1")]));
        assert_eq!(
            config.bind_addr().expect("valid addr").to_string(),
            "127.0.0.1:3001"
        );
    }
}
