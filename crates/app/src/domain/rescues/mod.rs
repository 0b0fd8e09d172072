//! Rescue Requests
//!
//! Donation offers created by the cascade and claimed by collectors. Every status change
//! is a single conditional `UPDATE` guarded by the statuses the transition may leave, so
//! concurrent callers can never both win.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::RescueRequestsServiceError;
pub use service::*;
