//! Reprieve Domain Concerns

pub mod cascade;
pub mod collectors;
pub(crate) mod columns;
pub mod items;
pub mod locations;
pub mod rescues;
