//! Typed configuration sections.
//!
//! Each section reads its keys from a [`Config`] and falls back to the
//! defaults of the hosted tool.

use super::{Config, ConfigError};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ASSISTANT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const DEFAULT_SCOPE: &str = "openid profile email";
pub const DEFAULT_RESPONSE_TYPE: &str = "code";
pub const DEFAULT_RANDOM_LENGTH: usize = 16;

/// Assistant relay settings.
#[derive(Clone)]
pub struct AssistantSettings {
    /// API credential for the text-generation service.
    pub api_key: Option<String>,
    /// Model identifier (default: `gemini-3-flash-preview`).
    pub model: String,
    /// Base URL of the REST API.
    pub base_url: String,
}

impl std::fmt::Debug for AssistantSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Defaults pre-filled into the authorization request builder.
#[derive(Debug, Clone)]
pub struct BuilderSettings {
    pub authorization_endpoint: String,
    pub redirect_uri: String,
    pub scope: String,
    pub response_type: String,
    /// Length of generated `state` / `nonce` values.
    pub random_length: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// All typed sections of the configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub assistant: AssistantSettings,
    pub builder: BuilderSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Every key understood by the typed sections. Environment overrides
    /// are only looked up for these.
    pub const KEYS: &'static [&'static str] = &[
        "assistant.api_key",
        "assistant.model",
        "assistant.base_url",
        "builder.authorization_endpoint",
        "builder.redirect_uri",
        "builder.scope",
        "builder.response_type",
        "builder.random_length",
        "logging.filter",
    ];

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Settings {
            assistant: AssistantSettings {
                api_key: config.get_opt("assistant.api_key")?,
                model: config.get_or("assistant.model", DEFAULT_MODEL.to_string())?,
                base_url: config
                    .get_or("assistant.base_url", DEFAULT_ASSISTANT_BASE_URL.to_string())?,
            },
            builder: BuilderSettings {
                authorization_endpoint: config.get_or(
                    "builder.authorization_endpoint",
                    DEFAULT_AUTHORIZATION_ENDPOINT.to_string(),
                )?,
                redirect_uri: config
                    .get_or("builder.redirect_uri", DEFAULT_REDIRECT_URI.to_string())?,
                scope: config.get_or("builder.scope", DEFAULT_SCOPE.to_string())?,
                response_type: config
                    .get_or("builder.response_type", DEFAULT_RESPONSE_TYPE.to_string())?,
                random_length: config.get_or("builder.random_length", DEFAULT_RANDOM_LENGTH)?,
            },
            logging: LoggingSettings {
                filter: config.get_opt("logging.filter")?,
            },
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            assistant: AssistantSettings {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_ASSISTANT_BASE_URL.to_string(),
            },
            builder: BuilderSettings {
                authorization_endpoint: DEFAULT_AUTHORIZATION_ENDPOINT.to_string(),
                redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
                scope: DEFAULT_SCOPE.to_string(),
                response_type: DEFAULT_RESPONSE_TYPE.to_string(),
                random_length: DEFAULT_RANDOM_LENGTH,
            },
            logging: LoggingSettings::default(),
        }
    }
}
