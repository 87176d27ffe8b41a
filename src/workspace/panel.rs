//! Assessment panel state.

use crate::services::AssessmentGateway;
use crate::{Error, Result};

/// Prefix shown before a failure message in the report area.
pub const FAILURE_PREFIX: &str = "Error performing AI assessment: ";

/// Where the panel is in an assessment round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssessmentState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Waiting on the gateway. Resubmission is disabled.
    Loading,
    /// The gateway returned a report.
    Completed(String),
    /// The gateway failed; holds the inline failure text.
    Failed(String),
}

/// The assessment panel: a prompt box, a submit action and a report area.
#[derive(Debug, Clone, Default)]
pub struct AssessmentPanel {
    open: bool,
    prompt: String,
    state: AssessmentState,
}

impl AssessmentPanel {
    /// Creates a closed, empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the panel.
    pub const fn open(&mut self) {
        self.open = true;
    }

    /// Closes the panel. Prompt and last report are kept.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Returns true if the panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Replaces the prompt text.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Returns the prompt text as typed.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &AssessmentState {
        &self.state
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, AssessmentState::Loading)
    }

    /// Returns true if the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.prompt.trim().is_empty()
    }

    /// Enters `Loading` and returns the prompt to send.
    ///
    /// Returns `None` without touching the state when submission is
    /// disabled. Any previous report is cleared.
    pub fn begin(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.state = AssessmentState::Loading;
        Some(self.prompt.clone())
    }

    /// Leaves `Loading` with the gateway's outcome.
    pub fn finish(&mut self, outcome: Result<String>) {
        self.state = match outcome {
            Ok(report) => AssessmentState::Completed(report),
            Err(e) => AssessmentState::Failed(failure_text(&e)),
        };
    }

    /// Returns the text shown in the report area, if any.
    #[must_use]
    pub fn report(&self) -> Option<&str> {
        match &self.state {
            AssessmentState::Completed(text) | AssessmentState::Failed(text) => Some(text),
            AssessmentState::Idle | AssessmentState::Loading => None,
        }
    }

    /// Submits the prompt through the gateway and records the outcome.
    ///
    /// Returns `false` if nothing was submitted.
    pub async fn submit(&mut self, gateway: &AssessmentGateway) -> bool {
        let Some(prompt) = self.begin() else {
            return false;
        };
        let outcome = gateway.assess_async(prompt).await;
        self.finish(outcome);
        true
    }
}

fn failure_text(error: &Error) -> String {
    format!("{FAILURE_PREFIX}{error}")
}
