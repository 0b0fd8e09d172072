//! Cascade Runs

mod errors;
mod handlers;

pub(crate) use handlers::*;
