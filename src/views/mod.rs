//! Derived views over store snapshots.
//!
//! Pure functions: the same input slices always produce the same output.
//! Nothing here is cached; collections are small and every caller re-pulls
//! from the store.

use crate::models::{
    AuditLogEntry, ConsentRecord, ConsentStatus, ConsentType, DataSubjectRequest, EntityType,
    RequestStatus,
};
use serde::Serialize;

/// Number of consent records shown in the recent-activity preview.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Number of requests shown as pending tasks in the backlog card.
pub const PENDING_TASK_LIMIT: usize = 3;

/// Count of granted consents for one consent type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// The consent type.
    pub consent_type: ConsentType,
    /// Number of granted records of that type.
    pub count: usize,
}

impl TypeCount {
    /// Returns this slice's share of `total` as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn share_of(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((self.count as f64 / total as f64) * 100.0).round() as u32
    }

    /// Returns the chart label, e.g. `Marketing (33%)`.
    #[must_use]
    pub fn label(&self, total: usize) -> String {
        format!("{} ({}%)", self.consent_type, self.share_of(total))
    }
}

/// Headline numbers for the DSR backlog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacklogSummary {
    /// All requests.
    pub total: usize,
    /// Requests with priority High or Urgent.
    pub urgent_or_high: usize,
    /// Preview of the first requests in collection order.
    pub pending_tasks: Vec<DataSubjectRequest>,
}

/// Counts granted consents per type.
///
/// Types are visited in the fixed [`ConsentType::all`] order and types with
/// no granted records are omitted, so the output never contains a zero.
#[must_use]
pub fn granted_by_type(records: &[ConsentRecord]) -> Vec<TypeCount> {
    ConsentType::all()
        .iter()
        .map(|&consent_type| TypeCount {
            consent_type,
            count: records
                .iter()
                .filter(|r| r.consent_type == consent_type && r.status == ConsentStatus::Granted)
                .count(),
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

/// Summarizes the request backlog.
///
/// `pending_tasks` is a plain prefix of the collection; it is neither sorted
/// nor filtered by status.
#[must_use]
pub fn dsr_backlog(requests: &[DataSubjectRequest]) -> BacklogSummary {
    BacklogSummary {
        total: requests.len(),
        urgent_or_high: requests
            .iter()
            .filter(|r| r.priority.is_escalated())
            .count(),
        pending_tasks: requests.iter().take(PENDING_TASK_LIMIT).cloned().collect(),
    }
}

/// Returns the first consent records in collection order.
#[must_use]
pub fn recent_activity(records: &[ConsentRecord]) -> Vec<ConsentRecord> {
    records.iter().take(RECENT_ACTIVITY_LIMIT).cloned().collect()
}

/// Returns the audit entries referencing one entity, in log order.
#[must_use]
pub fn audit_trail(
    entries: &[AuditLogEntry],
    entity_type: EntityType,
    entity_id: &str,
) -> Vec<AuditLogEntry> {
    entries
        .iter()
        .filter(|e| e.refers_to(entity_type, entity_id))
        .cloned()
        .collect()
}

/// Counts consent records per status, in [`ConsentStatus::all`] order.
#[must_use]
pub fn consent_status_totals(records: &[ConsentRecord]) -> Vec<(ConsentStatus, usize)> {
    ConsentStatus::all()
        .iter()
        .map(|&status| (status, records.iter().filter(|r| r.status == status).count()))
        .collect()
}

/// Counts requests per status, in [`RequestStatus::all`] order, omitting zeros.
#[must_use]
pub fn request_status_totals(requests: &[DataSubjectRequest]) -> Vec<(RequestStatus, usize)> {
    RequestStatus::all()
        .iter()
        .map(|&status| (status, requests.iter().filter(|r| r.status == status).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
