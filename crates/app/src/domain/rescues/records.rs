//! Rescue Request Records

use jiff::Timestamp;
use reprieve::{CascadeStage, RescueStatus};
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    domain::{
        collectors::records::CollectorUuid, items::records::ItemUuid,
        locations::records::LocationUuid,
    },
    uuids::TypedUuid,
};

/// Rescue Request UUID
pub type RescueRequestUuid = TypedUuid<RescueRequestRecord>;

/// Items offered by a request, in offer order. Cascade runs create single-item offers.
pub type RescueRequestItems = SmallVec<[ItemUuid; 4]>;

/// Rescue Request Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescueRequestRecord {
    pub uuid: RescueRequestUuid,
    pub location_uuid: LocationUuid,

    /// Present exactly when the status is accepted, in progress or completed.
    pub collector_uuid: Option<CollectorUuid>,

    pub status: RescueStatus,
    pub stage: CascadeStage,

    /// Whole days until expiry when the offer was created. Never recomputed.
    pub days_until_expiration: i32,

    pub scheduled_pickup_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub total_weight_kg: Decimal,

    /// Base-price value of the offered stock, in minor units.
    pub total_value: u64,

    pub estimated_impact_kg: Decimal,

    /// Offered items that still exist in the catalog. Deleted items are left out.
    pub items: RescueRequestItems,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
