//! Cascade Data

use jiff::Timestamp;
use reprieve::{DiscountPercent, RescueState};

use crate::domain::items::records::ItemUuid;

/// The mutation a cascade run applies to one unflagged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFlag {
    pub item_uuid: ItemUuid,
    pub rescue_state: RescueState,
    pub discount: DiscountPercent,

    /// Recomputed from the base price and `discount`, never set on its own.
    pub current_price: u64,

    pub flagged_at: Timestamp,
}
