//! Pool policies and the value types the engine returns.
//!
//! Everything here is computed fresh on every query. Nothing is cached.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instants on the contest timeline.
pub type Timestamp = DateTime<Utc>;

/// Token rules for one pool, either contest-wide or task-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenPolicy {
    /// Tokens held at `start`. `None` disables the pool entirely.
    pub initial: Option<u32>,
    /// Cap on instantaneous availability. Generated tokens past it are lost.
    pub max: Option<u32>,
    /// Cap on lifetime consumption.
    pub total: Option<u32>,
    /// Minimum gap between two consumptions in this pool.
    pub min_interval: Duration,
    /// Length of one generation period, counted from `start`.
    pub gen_interval: Duration,
    /// Tokens added at the end of every generation period.
    pub gen_amount: u32,
}

impl TokenPolicy {
    /// A pool that never yields tokens.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A pool that regenerates instantly and therefore never runs out.
    pub fn infinite() -> Self {
        Self {
            initial: Some(0),
            gen_amount: 1,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.initial.is_some()
    }

    /// True when generation is instantaneous.
    pub fn is_infinite(&self) -> bool {
        self.is_enabled() && self.gen_amount > 0 && self.gen_interval_nanos() == 0
    }

    pub(crate) fn gen_interval_nanos(&self) -> i128 {
        duration_nanos(self.gen_interval)
    }

    pub(crate) fn min_interval_nanos(&self) -> i128 {
        duration_nanos(self.min_interval)
    }
}

/// Exact; `Duration::MAX` is about 1.8e28 ns, well inside i128.
fn duration_nanos(d: Duration) -> i128 {
    i128::try_from(d.as_nanos()).unwrap_or(i128::MAX)
}

/// Token count in a pool. Infinite pools never run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokens {
    Finite(u32),
    Infinite,
}

impl Tokens {
    /// True when at least one token could be spent, cooldown aside.
    pub fn any(&self) -> bool {
        !matches!(self, Tokens::Finite(0))
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokens::Finite(n) => write!(f, "{n}"),
            Tokens::Infinite => f.write_str("infinite"),
        }
    }
}

/// What a single pool looks like at the query instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolResult {
    /// Tokens usable now, ignoring cooldown.
    pub available: Tokens,
    /// Next instant at which the pool grows, if it ever will.
    pub next_generation: Option<Timestamp>,
    /// Instant at which the last consumption's cooldown lapses. Only set
    /// while still in the future.
    pub cooldown_expiration: Option<Timestamp>,
}

impl PoolResult {
    /// Nothing available, nothing scheduled.
    pub fn empty() -> Self {
        Self {
            available: Tokens::Finite(0),
            next_generation: None,
            cooldown_expiration: None,
        }
    }
}

/// Combined answer across the contest and task pools.
///
/// `next_generation` is a UI hint only. Whether a token may be played is
/// decided by `available` and `cooldown_expiration` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: Tokens,
    pub next_generation: Option<Timestamp>,
    pub cooldown_expiration: Option<Timestamp>,
}

impl Availability {
    pub fn none() -> Self {
        Self {
            available: Tokens::Finite(0),
            next_generation: None,
            cooldown_expiration: None,
        }
    }

    /// A token may be spent right now.
    pub fn can_play(&self) -> bool {
        self.available.any() && self.cooldown_expiration.is_none()
    }
}
