//! tokening-core — token pool simulation, merging, and configuration.
//! The service and CLI crates depend on this one.

pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod policy;
pub mod simulate;

pub use engine::tokens_available;
pub use error::TokenError;
pub use merge::merge;
pub use policy::{Availability, PoolResult, Timestamp, TokenPolicy, Tokens};
pub use simulate::simulate;
