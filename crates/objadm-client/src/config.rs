//! Client configuration types.
//!
//! The configuration file is TOML:
//!
//! ```toml
//! timeout = 30.0
//! insecure = false
//!
//! [aliases.play]
//! url = "https://play.example.net"
//! access_key = "admin"
//! secret_key = "secret"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Endpoint and credentials for one configured alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Base URL of the cluster, e.g. `https://play.example.net:9000`.
    pub url: String,

    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub secret_key: String,
}

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for a single admin request.
    #[serde(default = "default_timeout", with = "humantime_compat")]
    pub timeout: Duration,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,

    /// Configured aliases, keyed by alias name.
    #[serde(default)]
    pub aliases: BTreeMap<String, AliasConfig>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: false,
            aliases: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| ClientError::Config(format!("'{}': {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), aliases = config.aliases.len(), "loaded client config");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Every alias must carry an absolute `http` or `https` URL.
    pub fn validate(&self) -> Result<(), String> {
        for (name, alias) in &self.aliases {
            let url = reqwest::Url::parse(&alias.url)
                .map_err(|e| format!("alias '{}': invalid url '{}': {}", name, alias.url, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "alias '{}': unsupported url scheme '{}'",
                    name,
                    url.scheme()
                ));
            }
        }
        Ok(())
    }

    /// Look up an alias by name.
    pub fn alias(&self, name: &str) -> ClientResult<&AliasConfig> {
        self.aliases
            .get(name)
            .ok_or_else(|| ClientError::UnknownAlias(name.to_string()))
    }
}

mod humantime_compat {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("timeout must be a non-negative number of seconds"));
        }
        Duration::try_from_secs_f64(secs)
            .map_err(|e| serde::de::Error::custom(format!("timeout out of range: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
timeout = 5.5

[aliases.play]
url = "https://play.example.net"
access_key = "admin"
secret_key = "secret"

[aliases.local]
url = "http://127.0.0.1:9000"
"#;

    #[test]
    fn test_default_client_config() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(!cfg.insecure);
        assert!(cfg.aliases.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let cfg = ClientConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(cfg.timeout, Duration::from_millis(5500));
        assert_eq!(cfg.aliases.len(), 2);

        let play = cfg.alias("play").unwrap();
        assert_eq!(play.url, "https://play.example.net");
        assert_eq!(play.access_key, "admin");

        let local = cfg.alias("local").unwrap();
        assert_eq!(local.secret_key, "");
    }

    #[test]
    fn test_unknown_alias() {
        let cfg = ClientConfig::from_toml(SAMPLE).unwrap();
        let err = cfg.alias("nope").unwrap_err();
        assert!(matches!(err, ClientError::UnknownAlias(ref a) if a == "nope"));
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = ClientConfig::from_toml("[aliases.x]\nurl = \"not a url\"\n").unwrap_err();
        assert!(err.contains("alias 'x'"), "got: {}", err);

        let err = ClientConfig::from_toml("[aliases.x]\nurl = \"ftp://host\"\n").unwrap_err();
        assert!(err.contains("unsupported url scheme"), "got: {}", err);
    }

    #[test]
    fn test_rejects_negative_timeout() {
        assert!(ClientConfig::from_toml("timeout = -1.0\n").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        let err = ClientConfig::from_toml("timeout = 1e30\n").unwrap_err();
        assert!(err.contains("timeout out of range"), "got: {}", err);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"timeout = 1e30\n").unwrap();
        let err = ClientConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let cfg = ClientConfig::load(file.path()).unwrap();
        assert!(cfg.alias("play").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
