//! Store and workspace integration tests.
//!
//! Exercises the store through the same paths the workspace uses:
//! - Seeded contents and the dashboard derived from them
//! - Consent updates flowing to subscribers and re-pulled views
//! - Collection-filtered subscriptions
//! - Sharing one store across threads

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chrono::{NaiveDate, Utc};
use guardia::models::{Collection, IntegrationStatus, StoreEvent};
use guardia::store::{DSR_RESPONSE_WINDOW_DAYS, SeedData};
use guardia::views::granted_by_type;
use guardia::{
    AuditLogEntry, ConsentPolicy, ConsentRecord, ConsentStatus, ConsentType,
    DataCategoryDefinition, DomainStore, EntityType, RequestPriority, Tab, ThirdPartyIntegration,
    TypeCount, Workspace,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn seeded_records() -> Vec<ConsentRecord> {
    DomainStore::new().consent_records()
}

fn slice(consent_type: ConsentType, count: usize) -> TypeCount {
    TypeCount {
        consent_type,
        count,
    }
}

/// Ids deliberately out of lexical order so reordering would be visible.
const SHUFFLED_IDS: [&str; 3] = ["c", "a", "b"];

fn policies() -> Vec<ConsentPolicy> {
    let template = DomainStore::new().consent_policies().remove(0);
    SHUFFLED_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| ConsentPolicy {
            id: (*id).to_string(),
            name: format!("Policy {id}"),
            version: u32::try_from(i).unwrap() + 1,
            is_active: i % 2 == 0,
            ..template.clone()
        })
        .collect()
}

fn audit_entries() -> Vec<AuditLogEntry> {
    SHUFFLED_IDS
        .iter()
        .map(|id| AuditLogEntry {
            id: (*id).to_string(),
            timestamp: Utc::now(),
            user_id: "admin".to_string(),
            action: format!("consent.revoked.{id}"),
            entity_type: EntityType::ConsentRecord,
            entity_id: "2".to_string(),
            details: String::new(),
            ip_address: None,
            affected_fields: Some(vec!["status".to_string()]),
            old_value: Some(serde_json::json!({"status": "Granted"})),
            new_value: Some(serde_json::json!({"status": "Revoked"})),
        })
        .collect()
}

fn data_categories() -> Vec<DataCategoryDefinition> {
    SHUFFLED_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| DataCategoryDefinition {
            id: (*id).to_string(),
            name: format!("Category {id}"),
            description: String::new(),
            sensitive: i == 0,
            examples: vec![format!("field_{id}")],
        })
        .collect()
}

fn third_parties() -> Vec<ThirdPartyIntegration> {
    SHUFFLED_IDS
        .iter()
        .zip(IntegrationStatus::all())
        .map(|(id, &status)| ThirdPartyIntegration {
            id: (*id).to_string(),
            name: format!("Processor {id}"),
            description: String::new(),
            data_categories_shared: vec!["Email".to_string()],
            regions: vec!["EU".to_string()],
            contract_signed: true,
            dpa_signed: status == IntegrationStatus::Active,
            status,
            last_reviewed_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        })
        .collect()
}

/// Asserts the store's only pending event replaced `collection` with `len` items.
fn assert_replaced(
    events: &mut tokio::sync::broadcast::Receiver<StoreEvent>,
    collection: Collection,
    len: usize,
) {
    match events.try_recv().unwrap() {
        StoreEvent::CollectionReplaced {
            collection: got,
            len: got_len,
            ..
        } => {
            assert_eq!(got, collection);
            assert_eq!(got_len, len);
        },
        other => panic!("unexpected event {other:?}"),
    }
    assert!(events.try_recv().is_err());
}

// ============================================================================
// Seed contents
// ============================================================================

#[test]
fn test_seed_contents() {
    let store = DomainStore::new();

    let records = store.consent_records();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(records[1].consent_type, ConsentType::DataSharing);
    assert_eq!(records[1].status, ConsentStatus::Revoked);

    let policies = store.consent_policies();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].name, "Global Marketing Policy");

    let requests = store.dsr_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].priority, RequestPriority::High);
    let window = requests[0].due_date - requests[0].submission_date;
    assert_eq!(
        window.num_days(),
        i64::try_from(DSR_RESPONSE_WINDOW_DAYS).unwrap()
    );

    assert!(store.audit_logs().is_empty());
    assert!(store.data_categories().is_empty());
    assert!(store.third_parties().is_empty());
    assert_eq!(store.revision(), 0);
}

#[test]
fn test_histogram_omits_revoked_and_missing_types() {
    // Two granted (Marketing, Analytics) and one revoked Data Sharing.
    let records: Vec<ConsentRecord> = seeded_records().into_iter().take(3).collect();
    assert_eq!(
        granted_by_type(&records),
        vec![
            slice(ConsentType::Marketing, 1),
            slice(ConsentType::Analytics, 1)
        ]
    );
}

#[test]
fn test_backlog_with_single_high_request() {
    let workspace = Workspace::new(Arc::new(DomainStore::new()));
    let backlog = workspace.dashboard().backlog;
    assert_eq!(backlog.total, 1);
    assert_eq!(backlog.urgent_or_high, 1);
    assert_eq!(backlog.pending_tasks.len(), 1);
}

// ============================================================================
// Change propagation
// ============================================================================

#[test]
fn test_revoking_consent_updates_dashboard() {
    let store = Arc::new(DomainStore::new());
    let mut workspace = Workspace::new(Arc::clone(&store));
    let before = workspace.dashboard();
    assert_eq!(before.granted_total, 3);

    let revoked = store
        .consent_record("3")
        .unwrap()
        .with_status(ConsentStatus::Revoked, Utc::now());
    assert!(store.update_consent_record(revoked));

    assert_eq!(workspace.refresh_pending(), 1);
    let after = workspace.dashboard();
    assert_eq!(after.granted_total, 2);
    assert_eq!(
        after.granted_by_type,
        vec![
            slice(ConsentType::Marketing, 1),
            slice(ConsentType::Essential, 1)
        ]
    );
    assert_eq!(after.recent_activity[2].status, ConsentStatus::Revoked);
    assert_eq!(store.revision(), 1);
}

#[test]
fn test_missing_record_publishes_nothing() {
    let store = Arc::new(DomainStore::new());
    let mut workspace = Workspace::new(Arc::clone(&store));
    let before = store.consent_records();

    let mut ghost = store.consent_record("1").unwrap();
    ghost.id = "999".to_string();
    assert!(!store.update_consent_record(ghost));

    assert_eq!(workspace.refresh_pending(), 0);
    assert_eq!(store.revision(), 0);
    assert_eq!(store.consent_records(), before);
}

#[test]
fn test_replace_collections_publishes_per_write() {
    let store = DomainStore::new();
    let mut events = store.subscribe();

    store.replace_consent_policies(Vec::new());
    store.replace_dsr_requests(Vec::new());
    store.replace_third_parties(Vec::new());

    let collections: Vec<Collection> = std::iter::from_fn(|| events.try_recv().ok())
        .map(|e| e.collection())
        .collect();
    assert_eq!(
        collections,
        vec![
            Collection::ConsentPolicies,
            Collection::DsrRequests,
            Collection::ThirdParties
        ]
    );
    assert_eq!(store.revision(), 3);
}

#[test]
fn test_replace_policies_stores_exact_list() {
    let store = DomainStore::new();
    let mut events = store.subscribe();
    store.replace_consent_policies(policies());

    assert_eq!(store.consent_policies(), policies());
    assert_replaced(&mut events, Collection::ConsentPolicies, 3);
}

#[test]
fn test_replace_audit_logs_stores_exact_list() {
    let store = DomainStore::new();
    let mut events = store.subscribe();
    let entries = audit_entries();
    store.replace_audit_logs(entries.clone());

    assert_eq!(store.audit_logs(), entries);
    assert_replaced(&mut events, Collection::AuditLogs, 3);
}

#[test]
fn test_replace_data_categories_stores_exact_list() {
    let store = DomainStore::new();
    let mut events = store.subscribe();
    store.replace_data_categories(data_categories());

    assert_eq!(store.data_categories(), data_categories());
    assert_replaced(&mut events, Collection::DataCategories, 3);
}

#[test]
fn test_replace_third_parties_stores_exact_list() {
    let store = DomainStore::new();
    let mut events = store.subscribe();
    store.replace_third_parties(third_parties());

    assert_eq!(store.third_parties(), third_parties());
    assert_replaced(&mut events, Collection::ThirdParties, 3);

    store.replace_third_parties(third_parties().into_iter().rev().collect());
    let ids: Vec<String> = store.third_parties().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_collection_subscription_filters_events() {
    let store = DomainStore::new();
    let mut audit = store.subscribe_collection(Collection::AuditLogs);

    store.replace_dsr_requests(Vec::new());
    store.replace_audit_logs(Vec::new());

    let event = tokio::time::timeout(Duration::from_secs(1), audit.recv())
        .await
        .expect("timed out")
        .expect("bus closed");
    assert!(matches!(
        event,
        StoreEvent::CollectionReplaced {
            collection: Collection::AuditLogs,
            len: 0,
            ..
        }
    ));
}

#[test]
fn test_empty_store_dashboard() {
    let workspace = Workspace::new(Arc::new(DomainStore::from_seed(SeedData::default())));
    let dashboard = workspace.dashboard();
    assert!(dashboard.granted_by_type.is_empty());
    assert_eq!(dashboard.granted_total, 0);
    assert_eq!(dashboard.backlog.total, 0);
    assert!(dashboard.recent_activity.is_empty());
}

#[test]
fn test_any_tab_reachable_from_any_tab() {
    let mut workspace = Workspace::new(Arc::new(DomainStore::new()));
    for &from in Tab::all() {
        for &to in Tab::all() {
            workspace.select_tab(from);
            assert_eq!(workspace.select_tab(to), from);
            assert_eq!(workspace.active_tab(), to);
        }
    }
}

#[test]
fn test_store_shared_across_threads() {
    let store = Arc::new(DomainStore::new());
    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            let record = store
                .consent_record("2")
                .unwrap()
                .with_status(ConsentStatus::Granted, Utc::now());
            store.update_consent_record(record)
        })
    };
    assert!(writer.join().unwrap());
    assert_eq!(
        store.consent_record("2").unwrap().status,
        ConsentStatus::Granted
    );
}
