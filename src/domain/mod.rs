//! Domain layer: pure decision logic and the state shapes it runs on.
//!
//! Nothing in this layer touches the network; every function here is a total
//! function of its inputs so it can be tested without a server.

pub mod guard;
pub mod permissions;
pub mod session;
pub mod types;
