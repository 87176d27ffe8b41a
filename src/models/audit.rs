//! Audit log entries.

use super::consent::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity an audit entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A consent record.
    ConsentRecord,
    /// A consent policy.
    ConsentPolicy,
    /// A data subject request.
    DataSubjectRequest,
    /// The workspace itself.
    System,
}

impl EntityType {
    /// Returns all entity types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ConsentRecord,
            Self::ConsentPolicy,
            Self::DataSubjectRequest,
            Self::System,
        ]
    }

    /// Returns the type tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConsentRecord => "ConsentRecord",
            Self::ConsentPolicy => "ConsentPolicy",
            Self::DataSubjectRequest => "DataSubjectRequest",
            Self::System => "System",
        }
    }

    /// Parses a type tag, ignoring case and separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| normalize(t.as_str()) == normalize(s))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the compliance audit trail.
///
/// `entity_id` is a weak reference: it is resolved by lookup only and the
/// target may no longer exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: String,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Actor.
    pub user_id: String,
    /// Action name ("consent.revoked", "policy.updated"...).
    pub action: String,
    /// Type tag of the referenced entity.
    pub entity_type: EntityType,
    /// Identifier of the referenced entity.
    pub entity_id: String,
    /// Free-text description.
    pub details: String,
    /// Origin address of the actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Fields touched by the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_fields: Option<Vec<String>>,
    /// Snapshot before the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<serde_json::Value>,
    /// Snapshot after the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<serde_json::Value>,
}

impl AuditLogEntry {
    /// Returns true if this entry references the given entity.
    #[must_use]
    pub fn refers_to(&self, entity_type: EntityType, entity_id: &str) -> bool {
        self.entity_type == entity_type && self.entity_id == entity_id
    }
}
