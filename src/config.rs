use std::env;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_THINKING_BUDGET: u32 = 2048;
pub const DEFAULT_JUDGE_MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub thinking_budget: u32,
    pub judge_max_output_tokens: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY")
                    .or_else(|_| env::var("API_KEY"))
                    .unwrap_or_default(),
            ),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            thinking_budget: env::var("THINKING_BUDGET")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_THINKING_BUDGET),
            judge_max_output_tokens: env::var("JUDGE_MAX_OUTPUT_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_JUDGE_MAX_OUTPUT_TOKENS),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Reports configuration that will make every model call fail.
    ///
    /// A missing key is not fatal: both gateways turn the resulting
    /// failures into their fallback values.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(
                "GEMINI_API_KEY is not set; model calls will fail".to_string(),
            ));
        }

        if self.gemini_model.trim().is_empty() {
            return Err(AppError::ConfigError("GEMINI_MODEL is empty".to_string()));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test_api_key".to_string()),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_model: "test-model".to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            judge_max_output_tokens: DEFAULT_JUDGE_MAX_OUTPUT_TOKENS,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
        }
    }
}
