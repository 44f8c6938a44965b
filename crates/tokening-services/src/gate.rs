//! Accept-token gate — decides whether a token request may be honoured.
//!
//! Pure. Recording the play is the ledger's job.

use tokening_core::Availability;

use crate::error::TokenRejection;

/// `Ok` when a token may be played on `submission` right now.
///
/// An exhausted pool or a running cooldown is checked before the
/// double-play, matching what contestants are told first.
pub fn check_play(
    availability: &Availability,
    submission: &str,
    already_played: bool,
) -> Result<(), TokenRejection> {
    if !availability.can_play() {
        return Err(TokenRejection::Unacceptable(*availability));
    }
    if already_played {
        return Err(TokenRejection::AlreadyPlayed(submission.to_string()));
    }
    Ok(())
}
