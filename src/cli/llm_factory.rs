//! Provider factory functions for CLI commands.
//!
//! Builds the configured [`TextGenerator`] and the gateway around it.

use std::sync::Arc;

use crate::config::{LlmConfig, LlmProvider};
use crate::llm::{GeminiClient, LlmHttpConfig, OpenAiClient, TextGenerator};
use crate::services::AssessmentGateway;
use secrecy::ExposeSecret;

/// Builds HTTP configuration from LLM config with environment overrides.
#[must_use]
pub fn build_http_config(llm_config: &LlmConfig) -> LlmHttpConfig {
    LlmHttpConfig::from_config(llm_config)
}

/// Builds a Gemini client from configuration.
#[must_use]
pub fn build_gemini_client(llm_config: &LlmConfig) -> GeminiClient {
    let mut client = GeminiClient::new();
    if let Some(ref api_key) = llm_config.api_key {
        client = client.with_api_key(api_key.expose_secret());
    }
    if let Some(ref model) = llm_config.model {
        client = client.with_model(model);
    }
    if let Some(ref base_url) = llm_config.base_url {
        client = client.with_endpoint(base_url);
    }
    client.with_http_config(build_http_config(llm_config))
}

/// Builds an `OpenAI` client from configuration.
#[must_use]
pub fn build_openai_client(llm_config: &LlmConfig) -> OpenAiClient {
    let mut client = OpenAiClient::new();
    if let Some(ref api_key) = llm_config.api_key {
        client = client.with_api_key(api_key.expose_secret());
    }
    if let Some(ref model) = llm_config.model {
        client = client.with_model(model);
    }
    if let Some(ref base_url) = llm_config.base_url {
        client = client.with_endpoint(base_url);
    }
    client.with_http_config(build_http_config(llm_config))
}

/// Builds the configured text-generation provider.
#[must_use]
pub fn build_text_generator(llm_config: &LlmConfig) -> Arc<dyn TextGenerator> {
    match llm_config.provider {
        LlmProvider::Gemini => Arc::new(build_gemini_client(llm_config)),
        LlmProvider::OpenAi => Arc::new(build_openai_client(llm_config)),
    }
}

/// Builds the assessment gateway over the configured provider.
#[must_use]
pub fn build_gateway(llm_config: &LlmConfig) -> AssessmentGateway {
    let gateway = AssessmentGateway::new(build_text_generator(llm_config));
    match llm_config.temperature {
        Some(temperature) => gateway.with_temperature(temperature),
        None => gateway,
    }
}
