//! Completion provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat-completions endpoint settings.
///
/// Sampling parameters left unset are omitted from requests, so the
/// provider's own defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the API (e.g. a local gateway or Azure endpoint).
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Timeout in seconds for a single completion request
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            max_tokens: None,
            timeout_seconds: 300,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: explicit `api_key` first, then the env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let config = FileProviderConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert!(config.temperature.is_none());
        assert_eq!(config.timeout_seconds, 300);
    }

    #[test]
    fn test_provider_deserialize() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:8080"
temperature = 0.2
max_tokens = 2048
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.temperature, Some(0.2));
        assert_eq!(config.provider.max_tokens, Some(2048));
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-explicit".to_string()),
            api_key_env: "DEBATE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileProviderConfig {
            api_key_env: "DEBATE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
