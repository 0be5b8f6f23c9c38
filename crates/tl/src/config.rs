use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tl_core::sources::LinkTemplates;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    pub db_path: String,
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub links: LinkTemplates,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            db_path: "timeline.db".to_string(),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            request_timeout_secs: 30,
            links: LinkTemplates::default(),
        }
    }
}

impl ServeConfig {
    /// Optional TOML file first, then `TIMELINE_*` environment overrides. A zero
    /// request timeout is rejected.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TIMELINE_DB_PATH") {
            self.db_path = value;
        }
        if let Some(value) = lookup("TIMELINE_HOST") {
            self.host = parse_env("TIMELINE_HOST", value)?;
        }
        if let Some(value) = lookup("TIMELINE_PORT") {
            self.port = parse_env("TIMELINE_PORT", value)?;
        }
        if let Some(value) = lookup("TIMELINE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("TIMELINE_REQUEST_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("TIMELINE_TIP_BASE_URL") {
            self.links.tip_base_url = value;
        }
        if let Some(value) = lookup("TIMELINE_RACB_BASE_URL") {
            self.links.racb_base_url = value;
        }
        if let Some(value) = lookup("TIMELINE_JIRA_BASE_URL") {
            self.links.jira_base_url = value;
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = ServeConfig::default().with_overrides(env(&[])).unwrap();
        assert_eq!(config.db_path, "timeline.db");
        assert_eq!(config.addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.links, LinkTemplates::default());
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.toml");
        std::fs::write(
            &path,
            r#"
db_path = "/data/fab.db"
port = 9000

[links]
jira_base_url = "https://jira.fab.local"
"#,
        )
        .unwrap();

        let config = ServeConfig::from_file(&path)
            .unwrap()
            .with_overrides(env(&[("TIMELINE_PORT", "9100")]))
            .unwrap();
        assert_eq!(config.db_path, "/data/fab.db");
        assert_eq!(config.port, 9100);
        assert_eq!(config.links.jira_base_url, "https://jira.fab.local");
        assert_eq!(config.links.tip_base_url, "https://tip.example.com");
    }

    #[test]
    fn bad_port_is_reported() {
        let err = ServeConfig::default()
            .with_overrides(env(&[("TIMELINE_PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for TIMELINE_PORT: eighty");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ServeConfig::default()
            .with_overrides(env(&[("TIMELINE_REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));

        let from_file = ServeConfig {
            request_timeout_secs: 0,
            ..ServeConfig::default()
        };
        assert!(from_file.with_overrides(env(&[])).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.toml");
        std::fs::write(&path, "dbpath = \"x.db\"\n").unwrap();
        assert!(matches!(
            ServeConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
