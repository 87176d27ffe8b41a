//! Data models for guardia.
//!
//! Plain value types shared by the store, the derived views and the
//! workspace. Every enumerated field is a closed enum, so an unrecognized
//! consent type or request status cannot be represented at all.

mod audit;
mod consent;
mod events;
mod policy;
mod reference;
mod request;

pub use audit::{AuditLogEntry, EntityType};
pub use consent::{ConsentRecord, ConsentStatus, ConsentType};
pub use events::{Collection, EventMeta, StoreEvent};
pub use policy::ConsentPolicy;
pub use reference::{DataCategoryDefinition, IntegrationStatus, ThirdPartyIntegration};
pub use request::{
    DataSubjectRequest, RequestNote, RequestPriority, RequestStatus, RequestType,
};
