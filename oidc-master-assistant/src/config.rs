use oidc_master_core::config::settings::{DEFAULT_ASSISTANT_BASE_URL, DEFAULT_MODEL};
use oidc_master_core::config::AssistantSettings;

use crate::error::AssistantError;

/// Connection settings for [`GeminiRelay`](crate::GeminiRelay).
#[derive(Clone)]
pub struct AssistantConfig {
    /// API credential, sent as the `key` query parameter.
    pub api_key: String,

    /// Model identifier (default: `gemini-3-flash-preview`).
    pub model: String,

    /// Base URL of the REST API, without trailing slash.
    pub base_url: String,
}

impl AssistantConfig {
    /// Create a config for `api_key` with the default model and base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
        }
    }

    /// Build from the `assistant.*` settings. Fails when no key is configured.
    pub fn from_settings(settings: &AssistantSettings) -> Result<Self, AssistantError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AssistantError::MissingApiKey)?;

        Ok(Self::new(api_key)
            .with_model(&settings.model)
            .with_base_url(&settings.base_url))
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override the API base URL, e.g. to point at a proxy.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// `{base_url}/models/{model}:generateContent`, without the key.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> AssistantSettings {
        AssistantSettings {
            api_key: api_key.map(String::from),
            model: "gemini-test".into(),
            base_url: "http://localhost:9999/v1beta/".into(),
        }
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            AssistantConfig::from_settings(&settings(None)),
            Err(AssistantError::MissingApiKey)
        ));
        assert!(matches!(
            AssistantConfig::from_settings(&settings(Some("  "))),
            Err(AssistantError::MissingApiKey)
        ));
    }

    #[test]
    fn endpoint_uses_model_and_trimmed_base() {
        let config = AssistantConfig::from_settings(&settings(Some("k"))).unwrap();
        assert_eq!(
            config.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn debug_never_shows_the_key() {
        let config = AssistantConfig::new("super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("gemini-3-flash-preview"));
    }
}
