//! Collectors

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CollectorsServiceError;
pub use service::*;
