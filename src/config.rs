//! Server configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::article::request::DEFAULT_MODEL;
use crate::llm::ollama_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_OLLAMA_URL};

/// Environment variable for the Ollama base URL.
pub const OLLAMA_URL_ENV: &str = "ARTICLE_GEN_OLLAMA_URL";
/// Environment variable for the listening port.
pub const PORT_ENV: &str = "ARTICLE_GEN_PORT";
/// Environment variable for the fallback model name.
pub const MODEL_ENV: &str = "ARTICLE_GEN_MODEL";
/// Environment variable for the static asset directory.
pub const STATIC_DIR_ENV: &str = "ARTICLE_GEN_STATIC_DIR";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Ollama URL does not parse.
    #[error("invalid ollama url: {0}")]
    Url(#[from] url::ParseError),
}

/// Settings for the HTTP server and its model endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Ollama base URL.
    pub ollama_url: String,
    /// Port to listen on.
    pub port: u16,
    /// Model used when a form leaves the model name blank.
    pub default_model: String,
    /// Directory holding the form page.
    pub static_dir: PathBuf,
    /// Connection setup timeout towards Ollama, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL.to_string(),
            static_dir: PathBuf::from("static"),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
        }
    }
}

impl ServerConfig {
    /// Build the config from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to defaults for
    /// missing, blank, or unparsable values.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            ollama_url: get(OLLAMA_URL_ENV).unwrap_or(defaults.ollama_url),
            port: get(PORT_ENV)
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_model: get(MODEL_ENV).unwrap_or(defaults.default_model),
            static_dir: get(STATIC_DIR_ENV).map_or(defaults.static_dir, PathBuf::from),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.ollama_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "ollama_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_model must not be empty".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection setup timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.ollama_url, "http://127.0.0.1:11434");
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_model, "phi3:3.8b");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (OLLAMA_URL_ENV, "http://10.0.0.5:19212"),
            (PORT_ENV, "8080"),
            (MODEL_ENV, "llama3.2:3b"),
            (STATIC_DIR_ENV, "/srv/form"),
        ]));
        assert_eq!(config.ollama_url, "http://10.0.0.5:19212");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_model, "llama3.2:3b");
        assert_eq!(config.static_dir, PathBuf::from("/srv/form"));
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[(PORT_ENV, "http")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ServerConfig {
            ollama_url: "not a url".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Url(_))));

        let config = ServerConfig {
            ollama_url: "ftp://host:21".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
