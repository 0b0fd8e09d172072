//! Item Data

use jiff::Timestamp;
use reprieve::Category;

use crate::domain::{items::records::ItemUuid, locations::records::LocationUuid};

/// New Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub uuid: ItemUuid,
    pub location_uuid: LocationUuid,
    pub name: String,
    pub category: Category,
    pub quantity_on_hand: u32,

    /// Items without an expiry date never enter the cascade.
    pub expires_at: Option<Timestamp>,

    /// Undiscounted shelf price, in minor units.
    pub base_price: u64,
}

/// A fresh lot replacing the stock on hand.
///
/// Restocking clears any rescue flag and restores the base price, so the item can be
/// picked up by a later cascade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restock {
    pub quantity_on_hand: u32,
    pub expires_at: Option<Timestamp>,
}
