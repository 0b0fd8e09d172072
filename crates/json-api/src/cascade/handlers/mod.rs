//! Cascade Run Handlers

pub(crate) mod run;
