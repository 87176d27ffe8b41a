//! Consent records and their enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of data use a consent covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentType {
    /// Outbound marketing communication.
    Marketing,
    /// Sharing personal data with third parties.
    #[serde(rename = "Data Sharing")]
    DataSharing,
    /// Product analytics and measurement.
    Analytics,
    /// Processing required to deliver the core service.
    Essential,
}

impl ConsentType {
    /// Returns all consent types in display order.
    ///
    /// The order is fixed and drives chart slice order on the dashboard.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Marketing,
            Self::DataSharing,
            Self::Analytics,
            Self::Essential,
        ]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Marketing => "Marketing",
            Self::DataSharing => "Data Sharing",
            Self::Analytics => "Analytics",
            Self::Essential => "Essential",
        }
    }

    /// Parses a consent type, ignoring case and separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "marketing" => Some(Self::Marketing),
            "datasharing" => Some(Self::DataSharing),
            "analytics" => Some(Self::Analytics),
            "essential" => Some(Self::Essential),
            _ => None,
        }
    }
}

impl fmt::Display for ConsentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a consent is currently in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentStatus {
    /// The subject granted consent.
    Granted,
    /// The subject withdrew consent.
    Revoked,
}

impl ConsentStatus {
    /// Returns all statuses.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Granted, Self::Revoked]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "Granted",
            Self::Revoked => "Revoked",
        }
    }

    /// Parses a status, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "granted" => Some(Self::Granted),
            "revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored grant or revocation of one user's permission for one data use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Record identifier.
    pub id: String,
    /// Subject the consent belongs to (informal reference, not enforced).
    pub user_id: String,
    /// Data use covered.
    pub consent_type: ConsentType,
    /// Current status.
    pub status: ConsentStatus,
    /// When the consent was given or withdrawn.
    pub timestamp: DateTime<Utc>,
    /// Free-text context.
    pub details: String,
    /// Channel the consent arrived through (Web, Mobile, System...).
    pub source: String,
    /// Regulatory justification for processing.
    pub legal_basis: String,
    /// When the consent lapses, if it does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl ConsentRecord {
    /// Returns true if this record is a granted consent.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.status == ConsentStatus::Granted
    }

    /// Returns a copy of this record with a new status and timestamp.
    #[must_use]
    pub fn with_status(mut self, status: ConsentStatus, at: DateTime<Utc>) -> Self {
        self.status = status;
        self.timestamp = at;
        self
    }
}

/// Lowercases and strips spaces, hyphens and underscores.
pub(crate) fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
