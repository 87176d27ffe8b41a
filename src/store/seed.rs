//! Initial workspace contents.

use crate::models::{
    AuditLogEntry, ConsentPolicy, ConsentRecord, ConsentStatus, ConsentType,
    DataCategoryDefinition, DataSubjectRequest, RequestPriority, RequestStatus, RequestType,
    ThirdPartyIntegration,
};
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Days between DSR submission and its statutory deadline.
pub const DSR_RESPONSE_WINDOW_DAYS: u64 = 30;

/// Contents loaded into a store at construction.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Consent records.
    pub consent_records: Vec<ConsentRecord>,
    /// Consent policies.
    pub consent_policies: Vec<ConsentPolicy>,
    /// Data subject requests.
    pub dsr_requests: Vec<DataSubjectRequest>,
    /// Audit log entries.
    pub audit_logs: Vec<AuditLogEntry>,
    /// Data category definitions.
    pub data_categories: Vec<DataCategoryDefinition>,
    /// Third-party integrations.
    pub third_parties: Vec<ThirdPartyIntegration>,
}

impl SeedData {
    /// The standard demo workspace, timestamped at `now`.
    ///
    /// Four consent records, one marketing policy and one high-priority
    /// access request. Audit log, categories and third parties start empty.
    #[must_use]
    pub fn standard(now: DateTime<Utc>) -> Self {
        Self {
            consent_records: vec![
                consent(
                    "1",
                    "usr_882",
                    ConsentType::Marketing,
                    ConsentStatus::Granted,
                    now,
                    "Signed up via homepage",
                    "Web",
                    "Consent",
                ),
                consent(
                    "2",
                    "usr_102",
                    ConsentType::DataSharing,
                    ConsentStatus::Revoked,
                    now,
                    "Opted out via profile settings",
                    "Mobile",
                    "Consent",
                ),
                consent(
                    "3",
                    "usr_443",
                    ConsentType::Analytics,
                    ConsentStatus::Granted,
                    now,
                    "Cookie banner acceptance",
                    "Web",
                    "Consent",
                ),
                consent(
                    "4",
                    "usr_221",
                    ConsentType::Essential,
                    ConsentStatus::Granted,
                    now,
                    "Core service requirement",
                    "System",
                    "Legitimate Interest",
                ),
            ],
            consent_policies: vec![ConsentPolicy {
                id: "pol-1".to_string(),
                name: "Global Marketing Policy".to_string(),
                description: "Rules for external marketing data.".to_string(),
                data_categories: strings(&["Email", "Behavioral"]),
                legal_basis: "Consent".to_string(),
                retention_period: "3 Years".to_string(),
                version: 1,
                is_active: true,
                created_at: date(2023, 1, 1),
                updated_at: date(2023, 10, 15),
                regions: strings(&["EU", "US"]),
                purpose: "Lead generation".to_string(),
                third_party_sharing: true,
                third_party_list: strings(&["SendGrid"]),
                is_automated_decision_making: false,
                automated_decision_details: None,
                review_cycle_in_days: 365,
                last_reviewed_at: None,
                next_review_at: None,
            }],
            dsr_requests: vec![DataSubjectRequest {
                id: "dsr-1".to_string(),
                user_id: "usr_882".to_string(),
                request_type: RequestType::Access,
                status: RequestStatus::Pending,
                details: "Wants all personal records.".to_string(),
                submission_date: now,
                completion_date: None,
                requested_data_categories: strings(&["PII", "Logs"]),
                assigned_to: None,
                notes: Vec::new(),
                attachments: None,
                priority: RequestPriority::High,
                due_date: now
                    .checked_add_days(Days::new(DSR_RESPONSE_WINDOW_DAYS))
                    .unwrap_or(now),
            }],
            audit_logs: Vec::new(),
            data_categories: Vec::new(),
            third_parties: Vec::new(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn consent(
    id: &str,
    user_id: &str,
    consent_type: ConsentType,
    status: ConsentStatus,
    timestamp: DateTime<Utc>,
    details: &str,
    source: &str,
    legal_basis: &str,
) -> ConsentRecord {
    ConsentRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        consent_type,
        status,
        timestamp,
        details: details.to_string(),
        source: source.to_string(),
        legal_basis: legal_basis.to_string(),
        expiration_date: None,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
