//! # Resend Configuration

use jebs_core::ApiError;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.resend.com";

/// Resend API configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key (re_...)
    pub api_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl ResendConfig {
    /// Load from `RESEND_API_KEY` and optional `RESEND_API_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RESEND_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::Configuration("RESEND_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(url) = env::var("RESEND_API_BASE_URL").ok().filter(|u| !u.is_empty()) {
            config = config.with_api_base_url(url);
        }
        Ok(config)
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}
