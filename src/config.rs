use std::env;
use secrecy::SecretString;

use crate::services::upstream::GenerationParams;

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_FALLBACK_MODELS: [&str; 4] = [
    "llama-3.3-70b-versatile",
    "llama-3.1-70b-versatile",
    "llama-3.1-8b-instant",
    "gemma2-9b-it",
];

pub const MAX_OUTPUT_TOKENS: u32 = 8000;
pub const TEMPERATURE: f32 = 0.7;

/// Model selection and generation settings shared by every invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub fallback_models: Vec<String>,
    pub text_model: String,
    pub vision_model: String,
    pub generation: GenerationParams,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            fallback_models: DEFAULT_FALLBACK_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            generation: GenerationParams {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub groq_api_key: SecretString,
    pub groq_api_base: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub models: ModelConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ModelConfig::default();

        Self {
            groq_api_key: SecretString::from(env::var("GROQ_API_KEY").unwrap_or_default()),
            groq_api_base: env::var("GROQ_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: parse_list(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            models: ModelConfig {
                fallback_models: env::var("FALLBACK_MODELS")
                    .map(|raw| parse_list(&raw))
                    .unwrap_or(defaults.fallback_models),
                text_model: env::var("TEXT_MODEL").unwrap_or(defaults.text_model),
                vision_model: env::var("VISION_MODEL").unwrap_or(defaults.vision_model),
                generation: defaults.generation,
            },
        }
    }

    /// Validate that the settings needed to reach the upstream API are present.
    /// Panics on missing values so a misconfigured server never starts.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.groq_api_key.expose_secret().trim().is_empty() {
            panic!("FATAL: GROQ_API_KEY is not set! Set GROQ_API_KEY environment variable.");
        }

        if self.models.fallback_models.is_empty() {
            panic!("FATAL: FALLBACK_MODELS is empty! At least one model is required.");
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            groq_api_key: SecretString::from("test_groq_key".to_string()),
            groq_api_base: "http://127.0.0.1:9".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            cors_allowed_origins: vec!["*".to_string()],
            models: ModelConfig::default(),
        }
    }
}

/// Splits a comma separated list, trimming entries and dropping blanks and repeats.
pub fn parse_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}
