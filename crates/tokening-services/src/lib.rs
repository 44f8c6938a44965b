//! tokening-services — the caller side of the token engine.
//!
//! Resolves when a participation starts accruing tokens, partitions its
//! play history per task, gates token requests and records accepted plays.

pub mod contest;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod schedule;

pub use contest::ContestTokens;
pub use error::TokenRejection;
pub use gate::check_play;
pub use ledger::{PlayedToken, TokenLedger};
pub use schedule::{Participation, Schedule};
