//! Combined contest + task query.

use crate::error::TokenError;
use crate::merge::merge;
use crate::policy::{Availability, Timestamp, TokenPolicy};
use crate::simulate::simulate;

/// Tokens a contestant can play on one task at `now`.
///
/// `contest_history` holds every consumption by the contestant, across all
/// tasks. `task_history` holds only those on the queried task. Both must be
/// sorted and lie within `[start, now]`.
pub fn tokens_available(
    contest: &TokenPolicy,
    task: &TokenPolicy,
    start: Timestamp,
    contest_history: &[Timestamp],
    task_history: &[Timestamp],
    now: Timestamp,
) -> Result<Availability, TokenError> {
    let contest = simulate(contest_history, contest, start, now)?;
    let task = simulate(task_history, task, start, now)?;
    Ok(merge(contest, task))
}
