//! Store change events.

use std::fmt;
use uuid::Uuid;

/// Shared event metadata.
#[derive(Debug, Clone)]
pub struct EventMeta {
    /// Unique identifier for this event.
    pub event_id: String,
    /// Monotonic store revision after the change.
    pub revision: u64,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

impl EventMeta {
    /// Creates metadata for the given revision using the current time.
    #[must_use]
    pub fn new(revision: u64) -> Self {
        Self {
            event_id: Uuid::now_v7().to_string(),
            revision,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// The domain collection a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Consent records.
    ConsentRecords,
    /// Consent policies.
    ConsentPolicies,
    /// Data subject requests.
    DsrRequests,
    /// Audit log.
    AuditLogs,
    /// Data category definitions.
    DataCategories,
    /// Third-party integrations.
    ThirdParties,
}

impl Collection {
    /// Returns the collection name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConsentRecords => "consent_records",
            Self::ConsentPolicies => "consent_policies",
            Self::DsrRequests => "dsr_requests",
            Self::AuditLogs => "audit_logs",
            Self::DataCategories => "data_categories",
            Self::ThirdParties => "third_parties",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events published by the domain store after a write.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A single consent record was replaced.
    ConsentRecordUpdated {
        /// Event metadata.
        meta: EventMeta,
        /// ID of the replaced record.
        record_id: String,
    },
    /// A whole collection was replaced.
    CollectionReplaced {
        /// Event metadata.
        meta: EventMeta,
        /// Which collection.
        collection: Collection,
        /// Number of items after replacement.
        len: usize,
    },
}

impl StoreEvent {
    /// Returns the event metadata.
    #[must_use]
    pub const fn meta(&self) -> &EventMeta {
        match self {
            Self::ConsentRecordUpdated { meta, .. } | Self::CollectionReplaced { meta, .. } => meta,
        }
    }

    /// Returns the collection this event touched.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::ConsentRecordUpdated { .. } => Collection::ConsentRecords,
            Self::CollectionReplaced { collection, .. } => *collection,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ConsentRecordUpdated { .. } => "consent_record_updated",
            Self::CollectionReplaced { .. } => "collection_replaced",
        }
    }
}
