//! Item categories and the per-category weight and impact heuristics used to size
//! donation offers.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Milk, cheese, yoghurt.
    Dairy,

    /// Fruit and vegetables.
    Produce,

    /// Bread and pastries.
    Bakery,

    /// Meat.
    Meat,

    /// Fish and shellfish.
    Seafood,

    /// Deli counter goods.
    Deli,

    /// Anything else.
    Other,
}

impl Category {
    /// Storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dairy => "dairy",
            Self::Produce => "produce",
            Self::Bakery => "bakery",
            Self::Meat => "meat",
            Self::Seafood => "seafood",
            Self::Deli => "deli",
            Self::Other => "other",
        }
    }
}

/// Unrecognised category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dairy" => Ok(Self::Dairy),
            "produce" => Ok(Self::Produce),
            "bakery" => Ok(Self::Bakery),
            "meat" => Ok(Self::Meat),
            "seafood" => Ok(Self::Seafood),
            "deli" => Ok(Self::Deli),
            "other" => Ok(Self::Other),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while sizing an offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    /// A total did not fit its representation.
    #[error("offer {0} overflowed")]
    Overflow(&'static str),
}

/// Per-unit estimates for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitHeuristic {
    /// Weight of one unit, in kilograms.
    pub weight_kg: Decimal,

    /// CO2-equivalent kept out of landfill by rescuing one unit, in kilograms.
    pub impact_kg: Decimal,
}

/// Derived totals recorded on a rescue request when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferTotals {
    /// Estimated weight of the offered stock.
    pub total_weight_kg: Decimal,

    /// Base-price value of the offered stock, in minor units.
    pub total_value: u64,

    /// Estimated CO2-equivalent saved.
    pub estimated_impact_kg: Decimal,
}

/// Lookup table of per-unit heuristics keyed by category.
///
/// Categories without an explicit entry fall back to the table's default unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHeuristics {
    fallback: UnitHeuristic,
    by_category: FxHashMap<Category, UnitHeuristic>,
}

impl Default for CategoryHeuristics {
    /// Produce weighs half a kilogram a unit, everything else a kilogram, and every unit
    /// is credited with 2.5 kg CO2e.
    fn default() -> Self {
        let impact_kg = Decimal::new(25, 1);

        Self::new(UnitHeuristic {
            weight_kg: Decimal::ONE,
            impact_kg,
        })
        .with_category(
            Category::Produce,
            UnitHeuristic {
                weight_kg: Decimal::new(5, 1),
                impact_kg,
            },
        )
    }
}

impl CategoryHeuristics {
    /// Table where every category uses `fallback`.
    #[must_use]
    pub fn new(fallback: UnitHeuristic) -> Self {
        Self {
            fallback,
            by_category: FxHashMap::default(),
        }
    }

    /// Override the heuristic for one category.
    #[must_use]
    pub fn with_category(mut self, category: Category, unit: UnitHeuristic) -> Self {
        self.by_category.insert(category, unit);
        self
    }

    /// Heuristic applied to `category`.
    #[must_use]
    pub fn unit(&self, category: Category) -> UnitHeuristic {
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Size an offer of `quantity` units priced at `base_price` each.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::Overflow`] if any total cannot be represented.
    pub fn totals(
        &self,
        category: Category,
        quantity: u32,
        base_price: u64,
    ) -> Result<OfferTotals, TotalsError> {
        let unit = self.unit(category);
        let units = Decimal::from(quantity);

        let total_value = base_price
            .checked_mul(u64::from(quantity))
            .ok_or(TotalsError::Overflow("value"))?;

        let total_weight_kg = unit
            .weight_kg
            .checked_mul(units)
            .ok_or(TotalsError::Overflow("weight"))?;

        let estimated_impact_kg = unit
            .impact_kg
            .checked_mul(units)
            .ok_or(TotalsError::Overflow("impact"))?;

        Ok(OfferTotals {
            total_weight_kg,
            total_value,
            estimated_impact_kg,
        })
    }
}
