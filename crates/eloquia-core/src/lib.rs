//! Ambient service plumbing shared by Eloquia binaries: configuration loading,
//! tracing setup, request-id middleware, health probes, serializers and
//! shutdown signalling.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod shutdown;
pub mod tracing;
