//! Data subject requests.

use super::consent::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GDPR/CCPA right a data subject is exercising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Right of access.
    Access,
    /// Right to erasure.
    Erasure,
    /// Right to rectification.
    Rectification,
    /// Right to data portability.
    Portability,
    /// Right to object.
    Objection,
    /// Right to restriction of processing.
    Restriction,
}

impl RequestType {
    /// Returns all request types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Access,
            Self::Erasure,
            Self::Rectification,
            Self::Portability,
            Self::Objection,
            Self::Restriction,
        ]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "Access",
            Self::Erasure => "Erasure",
            Self::Rectification => "Rectification",
            Self::Portability => "Portability",
            Self::Objection => "Objection",
            Self::Restriction => "Restriction",
        }
    }

    /// Parses a request type, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == normalize(s))
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Processing state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Received, not yet picked up.
    #[default]
    Pending,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Fulfilled.
    Completed,
    /// Declined.
    Rejected,
    /// Paused, usually awaiting identity verification.
    #[serde(rename = "On Hold")]
    OnHold,
}

impl RequestStatus {
    /// Returns all statuses.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Rejected,
            Self::OnHold,
        ]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::OnHold => "On Hold",
        }
    }

    /// Parses a status, ignoring case and separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == normalize(s))
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handling priority of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequestPriority {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
    /// Urgent.
    Urgent,
}

impl RequestPriority {
    /// Returns all priorities, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// Returns true for priorities counted in the escalated backlog.
    #[must_use]
    pub const fn is_escalated(&self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }

    /// Parses a priority, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == normalize(s))
    }
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A note attached to a request. Notes are append-only in practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNote {
    /// Note identifier.
    pub id: String,
    /// Author of the note.
    pub author_id: String,
    /// When the note was written.
    pub timestamp: DateTime<Utc>,
    /// Note text.
    pub content: String,
}

/// A formal request by a data subject to act on their personal data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSubjectRequest {
    /// Request identifier.
    pub id: String,
    /// Requesting subject (informal reference, not enforced).
    pub user_id: String,
    /// Right being exercised.
    pub request_type: RequestType,
    /// Processing state.
    pub status: RequestStatus,
    /// Free-text description of the request.
    pub details: String,
    /// When the request was received.
    pub submission_date: DateTime<Utc>,
    /// When the request was closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
    /// Data categories the subject asked about.
    pub requested_data_categories: Vec<String>,
    /// Assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Notes, oldest first.
    #[serde(default)]
    pub notes: Vec<RequestNote>,
    /// Attachment references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    /// Handling priority.
    pub priority: RequestPriority,
    /// Statutory deadline.
    pub due_date: DateTime<Utc>,
}
