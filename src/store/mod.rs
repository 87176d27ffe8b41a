//! In-memory domain store.
//!
//! [`DomainStore`] is the sole owner of the six workspace collections. It is
//! seeded once at construction and changes only through its named
//! operations. Every successful write publishes a [`StoreEvent`] so views can
//! re-pull derived data.
//!
//! Reads return owned snapshots. The store performs no validation: consent
//! records are trusted to carry sensible values, and bulk replacements are
//! taken as-is.

mod seed;

pub use seed::{DSR_RESPONSE_WINDOW_DAYS, SeedData};

use crate::models::{
    AuditLogEntry, Collection, ConsentPolicy, ConsentRecord, DataCategoryDefinition,
    DataSubjectRequest, EventMeta, StoreEvent, ThirdPartyIntegration,
};
use crate::observability::{EventBus, FilteredReceiver};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use tokio::sync::broadcast;

/// Owner of every domain collection.
///
/// Collections sit behind `RwLock`s so the store can be shared as
/// `Arc<DomainStore>` with the assessment task. There is a single logical
/// writer; the locks are not a concurrency-control scheme.
///
/// # Example
///
/// ```rust,ignore
/// use guardia::store::DomainStore;
///
/// let store = DomainStore::new();
/// let mut record = store.consent_record("2").unwrap();
/// record.status = guardia::ConsentStatus::Granted;
/// assert!(store.update_consent_record(record));
/// ```
pub struct DomainStore {
    consent_records: RwLock<Vec<ConsentRecord>>,
    consent_policies: RwLock<Vec<ConsentPolicy>>,
    dsr_requests: RwLock<Vec<DataSubjectRequest>>,
    audit_logs: RwLock<Vec<AuditLogEntry>>,
    data_categories: RwLock<Vec<DataCategoryDefinition>>,
    third_parties: RwLock<Vec<ThirdPartyIntegration>>,
    revision: AtomicU64,
    events: EventBus,
}

impl DomainStore {
    /// Creates a store seeded with the standard workspace contents.
    #[must_use]
    pub fn new() -> Self {
        Self::from_seed(SeedData::standard(chrono::Utc::now()))
    }

    /// Creates a store with every collection empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_seed(SeedData::default())
    }

    /// Creates a store from explicit seed contents.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        tracing::debug!(
            consent_records = seed.consent_records.len(),
            consent_policies = seed.consent_policies.len(),
            dsr_requests = seed.dsr_requests.len(),
            audit_logs = seed.audit_logs.len(),
            "Seeding domain store"
        );
        Self {
            consent_records: RwLock::new(seed.consent_records),
            consent_policies: RwLock::new(seed.consent_policies),
            dsr_requests: RwLock::new(seed.dsr_requests),
            audit_logs: RwLock::new(seed.audit_logs),
            data_categories: RwLock::new(seed.data_categories),
            third_parties: RwLock::new(seed.third_parties),
            revision: AtomicU64::new(0),
            events: EventBus::default(),
        }
    }

    /// Returns all consent records in collection order.
    #[must_use]
    pub fn consent_records(&self) -> Vec<ConsentRecord> {
        snapshot(&self.consent_records)
    }

    /// Returns the consent record with the given id.
    #[must_use]
    pub fn consent_record(&self, id: &str) -> Option<ConsentRecord> {
        let guard = self
            .consent_records
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.iter().find(|r| r.id == id).cloned()
    }

    /// Returns all consent policies.
    #[must_use]
    pub fn consent_policies(&self) -> Vec<ConsentPolicy> {
        snapshot(&self.consent_policies)
    }

    /// Returns all data subject requests.
    #[must_use]
    pub fn dsr_requests(&self) -> Vec<DataSubjectRequest> {
        snapshot(&self.dsr_requests)
    }

    /// Returns all audit log entries.
    #[must_use]
    pub fn audit_logs(&self) -> Vec<AuditLogEntry> {
        snapshot(&self.audit_logs)
    }

    /// Returns all data category definitions.
    #[must_use]
    pub fn data_categories(&self) -> Vec<DataCategoryDefinition> {
        snapshot(&self.data_categories)
    }

    /// Returns all third-party integrations.
    #[must_use]
    pub fn third_parties(&self) -> Vec<ThirdPartyIntegration> {
        snapshot(&self.third_parties)
    }

    /// Replaces every consent record whose id matches `record.id`.
    ///
    /// Ids are not checked for uniqueness, so duplicates are all replaced.
    /// Collection order is preserved. Returns `false` and leaves the
    /// collection untouched when no record has that id; no event is
    /// published in that case.
    pub fn update_consent_record(&self, record: ConsentRecord) -> bool {
        let record_id = record.id.clone();
        let replaced = {
            let mut guard = write(&self.consent_records);
            let mut replaced = 0usize;
            for slot in guard.iter_mut().filter(|r| r.id == record_id) {
                *slot = record.clone();
                replaced += 1;
            }
            replaced
        };
        if replaced == 0 {
            tracing::debug!(record_id = %record_id, "Consent record not found, update ignored");
            return false;
        }

        let revision = self.bump();
        tracing::debug!(record_id = %record_id, replaced, revision, "Consent record updated");
        self.events.publish(StoreEvent::ConsentRecordUpdated {
            meta: EventMeta::new(revision),
            record_id,
        });
        true
    }

    /// Replaces the whole consent policy collection.
    pub fn replace_consent_policies(&self, policies: Vec<ConsentPolicy>) {
        self.replace(&self.consent_policies, policies, Collection::ConsentPolicies);
    }

    /// Replaces the whole data subject request collection.
    pub fn replace_dsr_requests(&self, requests: Vec<DataSubjectRequest>) {
        self.replace(&self.dsr_requests, requests, Collection::DsrRequests);
    }

    /// Replaces the whole audit log.
    pub fn replace_audit_logs(&self, entries: Vec<AuditLogEntry>) {
        self.replace(&self.audit_logs, entries, Collection::AuditLogs);
    }

    /// Replaces the whole data category collection.
    pub fn replace_data_categories(&self, categories: Vec<DataCategoryDefinition>) {
        self.replace(&self.data_categories, categories, Collection::DataCategories);
    }

    /// Replaces the whole third-party collection.
    pub fn replace_third_parties(&self, integrations: Vec<ThirdPartyIntegration>) {
        self.replace(&self.third_parties, integrations, Collection::ThirdParties);
    }

    /// Subscribes to every change.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Subscribes to changes of one collection.
    #[must_use]
    pub fn subscribe_collection(
        &self,
        collection: Collection,
    ) -> FilteredReceiver<impl Fn(&StoreEvent) -> bool> {
        self.events.subscribe_collection(collection)
    }

    /// Returns the number of writes applied since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn replace<T>(&self, lock: &RwLock<Vec<T>>, items: Vec<T>, collection: Collection) {
        let len = items.len();
        *write(lock) = items;

        let revision = self.bump();
        tracing::debug!(collection = %collection, len, revision, "Collection replaced");
        self.events.publish(StoreEvent::CollectionReplaced {
            meta: EventMeta::new(revision),
            collection,
            len,
        });
    }

    fn bump(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot<T: Clone>(lock: &RwLock<Vec<T>>) -> Vec<T> {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write<T>(lock: &RwLock<Vec<T>>) -> RwLockWriteGuard<'_, Vec<T>> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
