//! Shared vocabulary for the weighted-load-balancer NDN forwarding strategy.
//!
//! This crate provides the name, packet and identifier types the strategy
//! crate and its host tables agree on, together with the error type and the
//! metrics primitives used across the workspace.

pub mod error;
pub mod metrics;
pub mod name;
pub mod packet;
pub mod types;

/// Reexport of common types
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
