//! Infrastructure adapters: HTTP transport and runtime bootstrap.

pub mod api;
pub mod telemetry;
