//! Rescue Request Handlers

pub(crate) mod accept;
pub(crate) mod cancel;
pub(crate) mod complete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod start;
