//! Privacy impact assessment gateway.
//!
//! Wraps a [`TextGenerator`] behind one operation: describe a data practice,
//! get back an assessment narrative. Every provider failure collapses into
//! [`Error::AssistantUnavailable`]; the detail goes to the log only.
//!
//! One attempt per call. No retry, no backoff, no gateway-level timeout.

use crate::llm::{
    ASSESSMENT_FALLBACK, COMPLIANCE_OFFICER_PROMPT, DEFAULT_TEMPERATURE, GenerationRequest,
    TextGenerator, build_assessment_prompt,
};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Gateway to the assessment service.
#[derive(Clone)]
pub struct AssessmentGateway {
    provider: Arc<dyn TextGenerator>,
    temperature: f32,
}

impl AssessmentGateway {
    /// Creates a gateway over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns the provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Returns the configured temperature.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Builds the request sent for a description, or `None` if it is blank.
    #[must_use]
    pub fn request_for(&self, description: &str) -> Option<GenerationRequest> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        Some(GenerationRequest {
            system_instruction: COMPLIANCE_OFFICER_PROMPT.to_string(),
            prompt: build_assessment_prompt(description),
            temperature: self.temperature,
        })
    }

    /// Runs a privacy impact assessment for a described data practice.
    ///
    /// Blocks for the duration of the provider call.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the description is blank; the provider
    ///   is not called.
    /// - [`Error::AssistantUnavailable`] if the provider fails for any reason.
    #[instrument(skip_all, fields(provider = self.provider.name(), model = self.provider.model()))]
    pub fn assess(&self, description: &str) -> Result<String> {
        let Some(request) = self.request_for(description) else {
            return Err(Error::InvalidInput(
                "assessment description is blank".to_string(),
            ));
        };

        let start = Instant::now();
        let outcome = self.provider.generate(&request);
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(Some(text)) if !text.trim().is_empty() => {
                metrics::counter!("assessments_total", "outcome" => "completed").increment(1);
                tracing::info!(elapsed_ms, chars = text.len(), "Assessment completed");
                Ok(text)
            },
            Ok(_) => {
                metrics::counter!("assessments_total", "outcome" => "empty").increment(1);
                tracing::warn!(elapsed_ms, "Assessment service returned no text");
                Ok(ASSESSMENT_FALLBACK.to_string())
            },
            Err(e) => {
                metrics::counter!("assessments_total", "outcome" => "failed").increment(1);
                tracing::error!(elapsed_ms, error = %e, "Assessment service error");
                Err(Error::AssistantUnavailable)
            },
        }
    }

    /// Runs [`assess`](Self::assess) on the blocking pool.
    ///
    /// The caller suspends until the provider answers or fails. There is no
    /// cancellation.
    ///
    /// # Errors
    ///
    /// Same as [`assess`](Self::assess). A panicked worker is reported as
    /// [`Error::AssistantUnavailable`].
    pub async fn assess_async(&self, description: String) -> Result<String> {
        if description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "assessment description is blank".to_string(),
            ));
        }
        let gateway = self.clone();
        tokio::task::spawn_blocking(move || gateway.assess(&description))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Assessment worker failed");
                Error::AssistantUnavailable
            })?
    }
}
