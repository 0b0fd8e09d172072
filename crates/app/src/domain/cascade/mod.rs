//! Cascade Runs
//!
//! One run reads a location's unflagged perishable stock, classifies each item and
//! writes every price change, rescue flag and donation offer in a single transaction.

pub mod data;
pub mod errors;
pub(crate) mod inventory;
pub(crate) mod plan;
pub mod service;
pub mod summary;

pub use errors::CascadeServiceError;
pub use service::*;
pub use summary::CascadeSummary;
