//! Discounts

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Percentages run from 0 to 100.
    #[error("discount percent must be between 0 and 100, got {0}")]
    OutOfRange(u16),

    /// The discounted price could not be represented in minor units.
    #[error("discounted price overflowed")]
    PriceConversion,
}

/// Whole-number percentage taken off an item's base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Stage 1 markdown.
    pub const TEN: Self = Self(10);

    /// Stage 2 markdown.
    pub const THIRTY: Self = Self(30);

    /// Stage 4 flash-sale markdown.
    pub const SEVENTY: Self = Self(70);

    /// Build a discount, rejecting anything above 100%.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] if `percent` is greater than 100.
    pub fn new(percent: u16) -> Result<Self, DiscountError> {
        match u8::try_from(percent) {
            Ok(value) if value <= 100 => Ok(Self(value)),
            _ => Err(DiscountError::OutOfRange(percent)),
        }
    }

    /// Percentage points.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this discount leaves prices unchanged.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Price after taking this discount off `base_price` (minor units).
    ///
    /// Half a minor unit rounds away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PriceConversion`] if the result cannot be represented.
    pub fn apply(self, base_price: u64) -> Result<u64, DiscountError> {
        let remaining = Decimal::from(100 - self.0);

        let Some(scaled) = Decimal::from(base_price).checked_mul(remaining) else {
            return Err(DiscountError::PriceConversion);
        };

        let Some(price) = scaled.checked_div(Decimal::ONE_HUNDRED) else {
            return Err(DiscountError::PriceConversion);
        };

        price
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or(DiscountError::PriceConversion)
    }
}

impl TryFrom<u16> for DiscountPercent {
    type Error = DiscountError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for u16 {
    fn from(discount: DiscountPercent) -> Self {
        u16::from(discount.0)
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
