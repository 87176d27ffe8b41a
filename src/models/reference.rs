//! Reference data: data categories and third-party processors.

use super::consent::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of personal data the organization processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCategoryDefinition {
    /// Category identifier.
    pub id: String,
    /// Name ("Email", "Behavioral").
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether this is special-category data.
    pub sensitive: bool,
    /// Example fields in this category.
    pub examples: Vec<String>,
}

/// Contract state of an external processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationStatus {
    /// Receiving data.
    Active,
    /// Not receiving data.
    Inactive,
    /// Awaiting a compliance review.
    #[serde(rename = "Pending Review")]
    PendingReview,
}

impl IntegrationStatus {
    /// Returns all integration states.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::Inactive, Self::PendingReview]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::PendingReview => "Pending Review",
        }
    }

    /// Parses an integration state, ignoring case and separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == normalize(s))
    }
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An external processor personal data is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyIntegration {
    /// Integration identifier.
    pub id: String,
    /// Processor name.
    pub name: String,
    /// What the processor does.
    pub description: String,
    /// Data categories shared with the processor.
    pub data_categories_shared: Vec<String>,
    /// Regions data flows to.
    pub regions: Vec<String>,
    /// Whether a service contract is signed.
    pub contract_signed: bool,
    /// Whether a data processing agreement is signed.
    pub dpa_signed: bool,
    /// Contract state.
    pub status: IntegrationStatus,
    /// Date of the last compliance review.
    pub last_reviewed_at: NaiveDate,
}
