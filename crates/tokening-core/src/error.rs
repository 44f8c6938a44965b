//! Engine errors — caller bugs, never "no tokens".
//!
//! A disabled or exhausted pool is a normal answer (`Tokens::Finite(0)`).
//! These variants mean the inputs broke a precondition, so the answer
//! would be meaningless.

use crate::policy::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("query at {now} precedes token start {start}")]
    QueryBeforeStart { start: Timestamp, now: Timestamp },
    #[error("token consumed at {at} before token start {start}")]
    ConsumedBeforeStart { at: Timestamp, start: Timestamp },
    #[error("token consumed at {at} after query instant {now}")]
    ConsumedAfterQuery { at: Timestamp, now: Timestamp },
    #[error("consumption history out of order at index {index}")]
    HistoryUnsorted { index: usize },
    #[error("timestamp arithmetic out of range")]
    TimeOverflow,
}
