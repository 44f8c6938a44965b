//! Reasons a token request or query is refused.

use tokening_core::{Availability, TokenError};

#[derive(Debug, thiserror::Error)]
pub enum TokenRejection {
    /// No token left, or a cooldown is still running.
    #[error("token request discarded: no tokens available")]
    Unacceptable(Availability),
    /// The submission already carries a token.
    #[error("token request discarded: submission {0} already has a token")]
    AlreadyPlayed(String),
    #[error("unknown task {0}")]
    UnknownTask(String),
    #[error("unknown participation {0}")]
    UnknownParticipation(String),
    #[error(transparent)]
    Engine(#[from] TokenError),
}
