mod loader;
pub mod settings;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use loader::env_var_for;
pub use settings::{AssistantSettings, BuilderSettings, LoggingSettings, Settings};
pub use value::{ConfigValue, FromConfigValue};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "OIDC_MASTER_";

/// Environment variable selecting the active profile.
pub const PROFILE_ENV: &str = "OIDC_MASTER_PROFILE";

/// Legacy variables that also provide the assistant credential, lowest priority first.
const API_KEY_ALIASES: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tool configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `oidc-master.yaml` (base)
/// 2. `oidc-master-{profile}.yaml` (profile override)
/// 3. `.env` file (loaded into process environment)
/// 4. `.env.{profile}` file (loaded into process environment)
/// 5. `API_KEY` / `GEMINI_API_KEY` for `assistant.api_key`
/// 6. `OIDC_MASTER_*` variables (e.g., `OIDC_MASTER_BUILDER_SCOPE` overrides `builder.scope`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `OIDC_MASTER_PROFILE` env var > argument > default `"dev"`.
#[derive(Debug, Clone)]
pub struct Config {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl Config {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load configuration for the given profile from `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile =
            std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();

        loader::load_yaml_file(&dir.join("oidc-master.yaml"), &mut values)?;
        let profile_file = format!("oidc-master-{active_profile}.yaml");
        loader::load_yaml_file(&dir.join(profile_file), &mut values)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        for alias in API_KEY_ALIASES {
            if let Ok(value) = std::env::var(alias) {
                values.insert("assistant.api_key".into(), ConfigValue::String(value));
            }
        }

        for key in Settings::KEYS {
            if let Ok(value) = std::env::var(env_var_for(key)) {
                values.insert((*key).to_string(), ConfigValue::String(value));
            }
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "Configuration loaded");

        Ok(Config {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(Config {
            values,
            profile: profile.to_string(),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        Config {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    /// Get an optional value; a missing key or an explicit null yields `None`.
    pub fn get_opt<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        self.get_or::<Option<V>>(key, None)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Build the typed [`Settings`] view of this configuration.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Settings::from_config(self)
    }
}
