//! velina: client core for a moderated blogging platform API.
//!
//! The library owns the session-authentication state every view consults, the
//! pure authorization and content-lifecycle rules, and the moderation
//! dashboard aggregator that re-queries the API after each mutating action.
//! The `velina-cli` binary drives all of it from the command line.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
