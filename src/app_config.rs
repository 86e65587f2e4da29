use anyhow::{anyhow, Result};
use std::env;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API endpoint
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

const DEFAULT_SOURCE_LANGUAGE: &str = "Japanese";
const DEFAULT_TARGET_LANGUAGE: &str = "English";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Application configuration module
/// This module holds the startup configuration: service credentials read
/// from the environment and the defaults preset in the window fields.
/// Represents the application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    // @field: API key for the translation service
    pub api_key: String,

    // @field: Service URL
    pub endpoint: String,

    // @field: Source language name preset in the UI
    pub source_language: String,

    // @field: Target language name preset in the UI
    pub target_language: String,

    // @field: Model identifier preset in the UI
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    // @creates: Configuration from the process environment
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV).unwrap_or_default();
        let endpoint = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self {
            api_key,
            endpoint,
            ..Default::default()
        }
    }

    // @validates: Presence of the credentials the provider needs
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "{} is not set; export an API key before starting",
                API_KEY_ENV
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("API endpoint cannot be empty"));
        }
        Ok(())
    }
}
