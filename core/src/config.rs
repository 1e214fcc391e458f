//! Client configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://trello.com/1";

/// Where the client talks to and which application it identifies as.
///
/// Deserializable so callers can keep it in whatever settings file they
/// already have; the library itself reads no environment or files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub application_key: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(application_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            application_key: application_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_api() {
        let config = ClientConfig::new("app-key");
        assert_eq!(config.base_url, "https://trello.com/1");
        assert_eq!(config.application_key, "app-key");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("k").with_base_url("http://localhost:3000/");
        assert_eq!(config.normalized_base_url(), "http://localhost:3000");
    }

    #[test]
    fn deserializes_with_default_base_url() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"application_key":"abc"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("abc"));
    }
}
