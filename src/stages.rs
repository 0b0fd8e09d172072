//! Cascade Stages

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a stored or requested stage/state name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseStageError {
    /// Stage numbers run from 1 to 4.
    #[error("cascade stage must be between 1 and 4, got {0}")]
    StageOutOfRange(i64),

    /// Unrecognised rescue state name.
    #[error("unknown rescue state \"{0}\"")]
    UnknownRescueState(String),
}

/// Position in the rescue cascade, from the earliest intervention to the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CascadeStage {
    /// 5 to 7 days left: light markdown.
    One,

    /// 3 to 4 days left: deeper markdown.
    Two,

    /// 1 to 2 days left: offered to collection organizations.
    Three,

    /// Expiry day: flash sale.
    Four,
}

impl CascadeStage {
    /// All stages in cascade order.
    pub const ALL: [CascadeStage; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Stage number, 1 through 4.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Zero-based position, for per-stage tallies.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.number()) - 1
    }
}

impl TryFrom<i64> for CascadeStage {
    type Error = ParseStageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ParseStageError::StageOutOfRange(other)),
        }
    }
}

impl TryFrom<u8> for CascadeStage {
    type Error = ParseStageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<CascadeStage> for u8 {
    fn from(stage: CascadeStage) -> Self {
        stage.number()
    }
}

impl fmt::Display for CascadeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The action the classifier prescribes for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescueAction {
    /// Mark the item down.
    PriceReduced,

    /// Leave the price alone and offer the stock to collectors.
    DonationOffered,

    /// Sell off at a steep discount on the final day.
    FinalSale,
}

impl RescueAction {
    /// Whether this action creates a rescue request for collectors.
    #[must_use]
    pub const fn creates_offer(self) -> bool {
        matches!(self, Self::DonationOffered)
    }
}

/// Rescue state recorded against an item.
///
/// `None` is the only state the cascade will pick an item up from. `EmployeeDiscount`
/// is set by store staff and is never produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescueState {
    /// Not yet flagged.
    #[default]
    None,

    /// Marked down by stage 1 or 2.
    PriceReduced,

    /// Offered to collection organizations by stage 3.
    DonationOffered,

    /// Discounted for staff.
    EmployeeDiscount,

    /// Flash-sale priced by stage 4.
    FinalSale,
}

impl RescueState {
    /// Storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceReduced => "price_reduced",
            Self::DonationOffered => "donation_offered",
            Self::EmployeeDiscount => "employee_discount",
            Self::FinalSale => "final_sale",
        }
    }

    /// Whether the item has already entered the cascade.
    #[must_use]
    pub const fn is_flagged(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<RescueAction> for RescueState {
    fn from(action: RescueAction) -> Self {
        match action {
            RescueAction::PriceReduced => Self::PriceReduced,
            RescueAction::DonationOffered => Self::DonationOffered,
            RescueAction::FinalSale => Self::FinalSale,
        }
    }
}

impl FromStr for RescueState {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "price_reduced" => Ok(Self::PriceReduced),
            "donation_offered" => Ok(Self::DonationOffered),
            "employee_discount" => Ok(Self::EmployeeDiscount),
            "final_sale" => Ok(Self::FinalSale),
            other => Err(ParseStageError::UnknownRescueState(other.to_string())),
        }
    }
}

impl fmt::Display for RescueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
