//! AI provider configuration (Gemini)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Secret<String>,

    /// Model used for text generation
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for image analysis
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Base URL for the Gemini API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum output tokens per generation
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Expose the API key for making requests
    pub fn api_key(&self) -> &str {
        self.gemini_api_key.expose_secret()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gemini_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        Ok(())
    }
}

fn default_text_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_vision_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    60
}
