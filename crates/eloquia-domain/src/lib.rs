//! Domain types shared across all Eloquia crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Status and role enums double as the storage encoding used by `infra/`.

pub mod account;
pub mod analytics;
pub mod entry;
pub mod link;
pub mod pairing;
pub mod session;
