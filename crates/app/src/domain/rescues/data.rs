//! Rescue Request Data

use jiff::Timestamp;
use reprieve::{CascadeStage, OfferTotals, RescueStatus};

use crate::domain::{
    collectors::records::CollectorUuid,
    locations::records::LocationUuid,
    rescues::records::{RescueRequestItems, RescueRequestUuid},
};

/// New Rescue Request Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRescueRequest {
    pub uuid: RescueRequestUuid,
    pub location_uuid: LocationUuid,
    pub stage: CascadeStage,
    pub days_until_expiration: i32,
    pub items: RescueRequestItems,
    pub totals: OfferTotals,
}

/// A collector's attempt to accept a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub collector_uuid: CollectorUuid,

    /// Must lie in the future when the claim is made.
    pub scheduled_pickup_at: Timestamp,
}

/// Narrows a listing. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescueRequestFilter {
    pub location_uuid: Option<LocationUuid>,
    pub collector_uuid: Option<CollectorUuid>,
    pub status: Option<RescueStatus>,
}
