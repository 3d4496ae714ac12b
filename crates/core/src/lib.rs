//! gitstamp core - domain types, errors and ports
//!
//! This crate describes dated commit requests and the ports the commit
//! operation talks to. It has no dependencies on Git libraries or the
//! filesystem - those are handled by adapters in the `gitstamp` crate.

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
