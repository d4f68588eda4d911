//! Test utilities for Eloquia services.
//!
//! Provides a migrated in-memory database and session cookie forging.
//! Use from `[dev-dependencies]` only.

pub mod auth;
pub mod db;
