//! Application services: stateful stores and views built on the API client.

pub mod comments;
pub mod dashboard;
pub mod error;
pub mod posts;
pub mod session;
