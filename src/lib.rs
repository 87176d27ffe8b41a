//! # Guardia
//!
//! Consent and compliance workspace.
//!
//! Guardia keeps consent records, data-subject requests, consent policies and
//! audit entries in an in-memory domain store, derives the dashboard
//! aggregates a privacy office looks at every morning, and forwards
//! free-text descriptions of data practices to a generative-AI service for a
//! privacy impact assessment.
//!
//! ## Layers
//!
//! - [`models`]: value types and their closed enumerations
//! - [`store`]: the single owner of every domain collection
//! - [`views`]: pure folds over store snapshots
//! - [`services`]: the assessment gateway
//! - [`workspace`]: tab and assessment-panel state, dashboard composition
//! - [`llm`]: text-generation clients behind [`TextGenerator`]
//! - [`config`], [`observability`], [`cli`]: the binary's plumbing
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use guardia::{DomainStore, Workspace};
//!
//! let store = Arc::new(DomainStore::new());
//! let workspace = Workspace::new(Arc::clone(&store));
//! let dashboard = workspace.dashboard();
//! for slice in &dashboard.granted_by_type {
//!     println!("{} {}", slice.consent_type, slice.count);
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod store;
pub mod views;
pub mod workspace;

pub use config::GuardiaConfig;
pub use llm::TextGenerator;
pub use models::{
    AuditLogEntry, ConsentPolicy, ConsentRecord, ConsentStatus, ConsentType,
    DataCategoryDefinition, DataSubjectRequest, EntityType, RequestPriority, RequestStatus,
    RequestType, ThirdPartyIntegration,
};
pub use services::AssessmentGateway;
pub use store::DomainStore;
pub use views::{BacklogSummary, TypeCount};
pub use workspace::{AssessmentPanel, AssessmentState, DashboardView, Tab, Workspace};

/// Error type for guardia operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Blank assessment prompt, unparseable CLI or config values |
/// | `OperationFailed` | HTTP transport errors, missing credentials, config I/O |
/// | `AssistantUnavailable` | Any failure reaching the assessment service, as seen by callers |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The LLM provider has no API key configured
    /// - The HTTP request fails or returns a non-success status
    /// - A configuration or log file cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The assessment service could not be reached.
    ///
    /// The underlying cause is logged where it happens and intentionally not
    /// carried here; callers only ever see the fixed message.
    #[error("Failed to communicate with AI Compliance Assistant.")]
    AssistantUnavailable,
}

/// Result type alias for guardia operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("prompt is blank".to_string());
        assert_eq!(err.to_string(), "invalid input: prompt is blank");

        let err = Error::OperationFailed {
            operation: "gemini_request".to_string(),
            cause: "connect error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'gemini_request' failed: connect error"
        );

        assert_eq!(
            Error::AssistantUnavailable.to_string(),
            "Failed to communicate with AI Compliance Assistant."
        );
    }
}
