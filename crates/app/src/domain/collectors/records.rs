//! Collector Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Collector UUID
pub type CollectorUuid = TypedUuid<CollectorRecord>;

/// Collector Record
///
/// A food bank or volunteer who can claim rescue requests.
#[derive(Debug, Clone)]
pub struct CollectorRecord {
    pub uuid: CollectorUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
