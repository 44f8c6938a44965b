//! CLI command modules.

pub mod context;
pub mod play;
pub mod policy;
pub mod status;
