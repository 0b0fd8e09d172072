//! Cascade Classifier
//!
//! Maps the time remaining before an item spoils onto a cascade stage. The mapping is a
//! fixed table over whole days:
//!
//! | days left | stage | action            | discount |
//! |-----------|-------|-------------------|----------|
//! | 5 – 7     | 1     | `PriceReduced`    | 10%      |
//! | 3 – 4     | 2     | `PriceReduced`    | 30%      |
//! | 1 – 2     | 3     | `DonationOffered` | 0%       |
//! | 0         | 4     | `FinalSale`       | 70%      |
//!
//! Anything else (more than a week out, or more than a day past expiry) is left alone.

use jiff::Timestamp;

use crate::{
    discounts::DiscountPercent,
    stages::{CascadeStage, RescueAction},
};

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Outcome of classifying a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Cascade stage reached.
    pub stage: CascadeStage,

    /// Action prescribed for the stage.
    pub action: RescueAction,

    /// Discount to apply; zero leaves the price untouched.
    pub discount: DiscountPercent,

    /// Whole days left, rounded up, at the instant of classification.
    pub days_left: i64,
}

impl Classification {
    /// Whether the item's price should be rewritten.
    #[must_use]
    pub fn changes_price(&self) -> bool {
        !self.discount.is_zero()
    }
}

/// Whole days between `now` and `expires_at`, rounded up.
///
/// An item expiring in 36 hours has 2 days left; one that expired an hour ago has 0.
#[must_use]
pub fn days_left(now: Timestamp, expires_at: Timestamp) -> i64 {
    let remaining = expires_at.duration_since(now).as_nanos();

    let whole_days = remaining.div_euclid(NANOS_PER_DAY);

    let days = if remaining.rem_euclid(NANOS_PER_DAY) == 0 {
        whole_days
    } else {
        whole_days + 1
    };

    // Timestamp spans roughly ±10k years, so this always fits.
    i64::try_from(days).unwrap_or(if days.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Classify an item by its expiry relative to `now`.
#[must_use]
pub fn classify(now: Timestamp, expires_at: Timestamp) -> Option<Classification> {
    classify_days(days_left(now, expires_at))
}

/// Classify by whole days left.
///
/// Total over `i64`: every value maps to exactly one stage or to `None`.
#[must_use]
pub fn classify_days(days_left: i64) -> Option<Classification> {
    let (stage, action, discount) = match days_left {
        5..=7 => (
            CascadeStage::One,
            RescueAction::PriceReduced,
            DiscountPercent::TEN,
        ),
        3..=4 => (
            CascadeStage::Two,
            RescueAction::PriceReduced,
            DiscountPercent::THIRTY,
        ),
        1..=2 => (
            CascadeStage::Three,
            RescueAction::DonationOffered,
            DiscountPercent::ZERO,
        ),
        0 => (
            CascadeStage::Four,
            RescueAction::FinalSale,
            DiscountPercent::SEVENTY,
        ),
        _ => return None,
    };

    Some(Classification {
        stage,
        action,
        discount,
        days_left,
    })
}
