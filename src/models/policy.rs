//! Consent policies.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A versioned rule set governing lawful basis, retention and sharing for a
/// category of data use.
///
/// `version` is expected to increase on every edit. Nothing in the store
/// enforces that; whoever replaces the policy list owns the numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPolicy {
    /// Policy identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Summary of what the policy covers.
    pub description: String,
    /// Data categories the policy applies to.
    pub data_categories: Vec<String>,
    /// Regulatory justification for processing.
    pub legal_basis: String,
    /// Retention period, free text ("3 Years").
    pub retention_period: String,
    /// Policy version.
    pub version: u32,
    /// Whether the policy is in force.
    pub is_active: bool,
    /// Creation date.
    pub created_at: NaiveDate,
    /// Last edit date.
    pub updated_at: NaiveDate,
    /// Jurisdictions the policy applies in.
    pub regions: Vec<String>,
    /// Processing purpose.
    pub purpose: String,
    /// Whether data is shared with third parties.
    pub third_party_sharing: bool,
    /// Named third parties receiving data.
    pub third_party_list: Vec<String>,
    /// Whether processing includes automated decision making.
    pub is_automated_decision_making: bool,
    /// Details of the automated decision making, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_decision_details: Option<String>,
    /// Days between reviews.
    pub review_cycle_in_days: u32,
    /// Date of the last review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<NaiveDate>,
    /// Date of the next scheduled review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<NaiveDate>,
}

impl ConsentPolicy {
    /// Returns the date the policy is next due for review.
    ///
    /// An explicit `next_review_at` wins. Otherwise the review cycle is
    /// counted from the last review, or from the last edit when the policy
    /// has never been reviewed.
    #[must_use]
    pub fn review_due_on(&self) -> Option<NaiveDate> {
        if self.next_review_at.is_some() {
            return self.next_review_at;
        }
        let anchor = self.last_reviewed_at.unwrap_or(self.updated_at);
        anchor.checked_add_days(Days::new(u64::from(self.review_cycle_in_days)))
    }
}
