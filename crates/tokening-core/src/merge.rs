//! Pool merger — combines the contest and task pools into one answer.
//!
//! A token can only be played when both pools allow it, so the merged
//! count is the smaller of the two and the merged cooldown the later.
//!
//! Decision table, evaluated top to bottom:
//!
//! | contest    | task       | available      | next_generation             |
//! |------------|------------|----------------|-----------------------------|
//! | Infinite   | Infinite   | Infinite       | None                        |
//! | Infinite   | Finite(t)  | as Finite(t+1) with no generation, then below |
//! | Finite(c)  | Infinite   | as Finite(c+1) with no generation, then below |
//! | c < t      |            | c              | contest's                   |
//! | t < c      |            | t              | task's                      |
//! | c == t     |            | c              | None if either None, else the later |

use std::cmp::Ordering;

use crate::policy::{Availability, PoolResult, Timestamp, Tokens};

/// One finite side of the merge.
#[derive(Clone, Copy)]
struct Side {
    available: u64,
    next_generation: Option<Timestamp>,
}

pub fn merge(contest: PoolResult, task: PoolResult) -> Availability {
    let cooldown_expiration = later(contest.cooldown_expiration, task.cooldown_expiration);

    let (available, next_generation) = match (contest.available, task.available) {
        (Tokens::Infinite, Tokens::Infinite) => (Tokens::Infinite, None),
        (Tokens::Infinite, Tokens::Finite(t)) => {
            let task = finite(t, task.next_generation);
            combine(ahead_of(task), task)
        }
        (Tokens::Finite(c), Tokens::Infinite) => {
            let contest = finite(c, contest.next_generation);
            combine(contest, ahead_of(contest))
        }
        (Tokens::Finite(c), Tokens::Finite(t)) => combine(
            finite(c, contest.next_generation),
            finite(t, task.next_generation),
        ),
    };

    Availability {
        available,
        next_generation,
        cooldown_expiration,
    }
}

fn finite(available: u32, next_generation: Option<Timestamp>) -> Side {
    Side {
        available: u64::from(available),
        next_generation,
    }
}

/// Stand-in for an infinite pool: always one more than the other side, and
/// never generating.
fn ahead_of(other: Side) -> Side {
    Side {
        available: other.available + 1,
        next_generation: None,
    }
}

fn combine(contest: Side, task: Side) -> (Tokens, Option<Timestamp>) {
    let bottleneck = match contest.available.cmp(&task.available) {
        Ordering::Less => contest,
        Ordering::Greater => task,
        Ordering::Equal => Side {
            available: task.available,
            next_generation: match (contest.next_generation, task.next_generation) {
                (Some(c), Some(t)) => Some(c.max(t)),
                _ => None,
            },
        },
    };
    // The bottleneck is always one of the real u32 counts.
    let available = u32::try_from(bottleneck.available).unwrap_or(u32::MAX);
    (Tokens::Finite(available), bottleneck.next_generation)
}

/// `None` means "no cooldown", not "earliest".
fn later(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
