//! Reprieve
//!
//! Reprieve decides how at-risk perishable stock is rescued before it spoils: which
//! cascade stage an item has reached, what its price becomes, and how a donation offer
//! moves from `pending` through to a completed pickup.
//!
//! This crate is pure. It performs no I/O and never reads the clock; every time-dependent
//! function takes the current instant as an argument.

pub mod categories;
pub mod classifier;
pub mod discounts;
pub mod rescues;
pub mod stages;

pub use categories::{
    Category, CategoryHeuristics, OfferTotals, TotalsError, UnitHeuristic, UnknownCategory,
};
pub use classifier::{Classification, classify, classify_days, days_left};
pub use discounts::{DiscountError, DiscountPercent};
pub use rescues::{InvalidTransition, RescueStatus, RescueTransition, UnknownStatus};
pub use stages::{CascadeStage, ParseStageError, RescueAction, RescueState};
