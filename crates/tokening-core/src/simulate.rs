//! Pool simulator — replays one pool's consumption history.
//!
//! The pool starts at `start` with `initial` tokens. Every `gen_interval`
//! after `start` it gains `gen_amount`, clamped to `max`. Each entry of the
//! history spends one token. Replaying up to `now` gives the count the
//! contestant holds now, when the pool grows next, and when the cooldown
//! from the last consumption lapses.
//!
//! Single linear pass, no sorting. The history must already be ordered;
//! violations are reported as `TokenError`, never guessed around.

use chrono::TimeDelta;

use crate::error::TokenError;
use crate::policy::{PoolResult, Timestamp, TokenPolicy, Tokens};

/// Stand-in period for pools that never generate, keeping tick arithmetic
/// free of a zero divisor. Unobservable since `gen_amount` is 0 there.
const IDLE_INTERVAL_NANOS: i128 = 1_000_000_000;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Simulate one pool from `start` up to `now`.
pub fn simulate(
    history: &[Timestamp],
    policy: &TokenPolicy,
    start: Timestamp,
    now: Timestamp,
) -> Result<PoolResult, TokenError> {
    let Some(initial) = policy.initial else {
        return Ok(PoolResult::empty());
    };
    check_timeline(history, start, now)?;

    let cooldown = match history.last() {
        Some(&last) => shift(last, policy.min_interval_nanos())?,
        None => start,
    };
    let cooldown_expiration = (cooldown > now).then_some(cooldown);

    if policy.is_infinite() {
        return Ok(PoolResult {
            available: Tokens::Infinite,
            next_generation: None,
            cooldown_expiration,
        });
    }

    let played = i64::try_from(history.len()).unwrap_or(i64::MAX);
    if let Some(total) = policy.total {
        if played >= i64::from(total) {
            return Ok(PoolResult::empty());
        }
    }

    let clock = GenClock::new(start, policy);
    let gen_amount = i64::from(policy.gen_amount);
    let clamp = |avail: i64| match policy.max {
        Some(max) => avail.min(i64::from(max)),
        None => avail,
    };

    let mut avail = i64::from(initial);
    let mut prev = start;
    for &t in history {
        avail = clamp(avail.saturating_add(clock.ticks(prev, t).saturating_mul(gen_amount)));
        avail -= 1;
        prev = t;
    }
    avail = clamp(avail.saturating_add(clock.ticks(prev, now).saturating_mul(gen_amount)));

    let saturated = policy.max.is_some_and(|max| avail >= i64::from(max));
    let mut next_generation = if gen_amount > 0 && !saturated {
        Some(clock.next_tick(now)?)
    } else {
        None
    };

    if let Some(total) = policy.total {
        let remaining = i64::from(total) - played;
        if avail >= remaining {
            avail = remaining;
            next_generation = None;
        }
    }

    Ok(PoolResult {
        available: Tokens::Finite(u32::try_from(avail.max(0)).unwrap_or(u32::MAX)),
        next_generation,
        cooldown_expiration,
    })
}

/// Reject inputs the replay cannot make sense of.
fn check_timeline(
    history: &[Timestamp],
    start: Timestamp,
    now: Timestamp,
) -> Result<(), TokenError> {
    if now < start {
        return Err(TokenError::QueryBeforeStart { start, now });
    }
    let mut prev = start;
    for (index, &at) in history.iter().enumerate() {
        if at < start {
            return Err(TokenError::ConsumedBeforeStart { at, start });
        }
        if at > now {
            return Err(TokenError::ConsumedAfterQuery { at, now });
        }
        if at < prev {
            return Err(TokenError::HistoryUnsorted { index });
        }
        prev = at;
    }
    Ok(())
}

fn shift(at: Timestamp, nanos: i128) -> Result<Timestamp, TokenError> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok();
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SEC)).ok();
    secs.zip(subsec)
        .and_then(|(secs, subsec)| TimeDelta::new(secs, subsec))
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or(TokenError::TimeOverflow)
}

/// Exact nanosecond count of a chrono delta.
fn delta_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SEC + i128::from(delta.subsec_nanos())
}

/// Generation periods counted from `start`, in nanoseconds.
struct GenClock {
    start: Timestamp,
    interval: i128,
}

impl GenClock {
    fn new(start: Timestamp, policy: &TokenPolicy) -> Self {
        let interval = match policy.gen_interval_nanos() {
            0 => IDLE_INTERVAL_NANOS,
            nanos => nanos,
        };
        Self { start, interval }
    }

    /// Whole periods elapsed between `start` and `at`.
    fn periods(&self, at: Timestamp) -> i128 {
        delta_nanos(at - self.start).div_euclid(self.interval)
    }

    /// Period boundaries crossed in `(from, to]`.
    fn ticks(&self, from: Timestamp, to: Timestamp) -> i64 {
        i64::try_from(self.periods(to) - self.periods(from)).unwrap_or(i64::MAX)
    }

    /// First period boundary strictly after `at`.
    fn next_tick(&self, at: Timestamp) -> Result<Timestamp, TokenError> {
        let offset = (self.periods(at) + 1)
            .checked_mul(self.interval)
            .ok_or(TokenError::TimeOverflow)?;
        shift(self.start, offset)
    }
}
