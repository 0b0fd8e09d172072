//! Location Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Location UUID
pub type LocationUuid = TypedUuid<LocationRecord>;

/// Location Record
///
/// A store whose catalog owns perishable items.
#[derive(Debug, Clone)]
pub struct LocationRecord {
    pub uuid: LocationUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
