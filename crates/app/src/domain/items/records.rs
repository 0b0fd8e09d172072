//! Item Records

use jiff::Timestamp;
use reprieve::{Category, DiscountPercent, RescueState};

use crate::{domain::locations::records::LocationUuid, uuids::TypedUuid};

/// Item UUID
pub type ItemUuid = TypedUuid<ItemRecord>;

/// Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub uuid: ItemUuid,
    pub location_uuid: LocationUuid,
    pub name: String,
    pub category: Category,
    pub quantity_on_hand: u32,
    pub expires_at: Option<Timestamp>,

    /// Undiscounted shelf price, in minor units.
    pub base_price: u64,

    /// Price after any cascade discount, in minor units.
    pub current_price: u64,

    pub discount: DiscountPercent,
    pub rescue_state: RescueState,

    /// When the cascade last flagged this item. Set exactly when `rescue_state` is not
    /// [`RescueState::None`].
    pub flagged_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
