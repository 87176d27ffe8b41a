//! Text-generation client abstraction.
//!
//! The assessment gateway talks to a [`TextGenerator`]; concrete clients
//! wrap a hosted model behind a blocking HTTP call.

mod gemini;
mod openai;
pub mod system_prompt;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use system_prompt::{
    ASSESSMENT_FALLBACK, COMPLIANCE_OFFICER_PROMPT, DEFAULT_TEMPERATURE, build_assessment_prompt,
};

use crate::Result;
use std::time::Duration;

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System-level persona instruction.
    pub system_instruction: String,
    /// User prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Trait for text-generation providers.
pub trait TextGenerator: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// The model identifier sent with each request.
    fn model(&self) -> &str;

    /// Generates text for the request.
    ///
    /// Returns `Ok(None)` when the service answered but produced no text.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the request cannot be
    /// sent, or the service answers with an error status or malformed body.
    fn generate(&self, request: &GenerationRequest) -> Result<Option<String>>;
}

/// HTTP client configuration for LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::LlmConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings.with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout_ms) = env_u64("GUARDIA_LLM_TIMEOUT_MS") {
            self.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = env_u64("GUARDIA_LLM_CONNECT_TIMEOUT_MS") {
            self.connect_timeout_ms = connect_timeout_ms;
        }
        self
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Builds a blocking HTTP client for LLM requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Classifies a transport error for logging.
pub(crate) fn error_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_request() {
        "request"
    } else if e.is_decode() {
        "decode"
    } else {
        "unknown"
    }
}

/// Returns `Some(text)` unless the text is empty or whitespace only.
pub(crate) fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
