//! Session and credential primitives for the Eloquia API.
//!
//! Provides signed session claims, the session cookie builders, argon2
//! password hashing and validated auth settings.

pub mod cookie;
pub mod manager;
pub mod password;
pub mod session;
pub mod settings;
