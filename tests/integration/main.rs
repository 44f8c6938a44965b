//! tokening integration tests.
//!
//! Contest timelines driven end to end through the service layer: policies
//! from config, plays through the ledger, answers from the engine.
//!
//!   cargo test --test integration
//!
//! Every test builds its own contest and ledger; nothing is shared.

use std::time::Duration;

use chrono::{TimeDelta, TimeZone, Utc};
use tokening_core::{Availability, Timestamp, TokenPolicy, Tokens};
use tokening_services::{ContestTokens, Participation, PlayedToken, Schedule, TokenLedger};

mod config_driven;
mod ledger_flow;

// ── Harness ───────────────────────────────────────────────────────────────────

pub const PARTICIPANT: &str = "alice";
/// The task every query is made on.
pub const TASK: &str = "sum";
/// Another task; plays on it only touch the contest pool.
pub const OTHER_TASK: &str = "graph";

pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// `secs` after the contest start.
pub fn at(secs: i64) -> Timestamp {
    t0() + TimeDelta::seconds(secs)
}

pub fn finite(initial: u32, number: u32, interval: u64, max: Option<u32>) -> TokenPolicy {
    TokenPolicy {
        initial: Some(initial),
        max,
        total: None,
        min_interval: Duration::ZERO,
        gen_interval: Duration::from_secs(interval),
        gen_amount: number,
    }
}

pub fn constrained(policy: TokenPolicy, total: Option<u32>, min_interval: u64) -> TokenPolicy {
    TokenPolicy {
        total,
        min_interval: Duration::from_secs(min_interval),
        ..policy
    }
}

/// A contest with `TASK` and `OTHER_TASK`, the latter always infinite.
pub struct Harness {
    pub contest: ContestTokens,
    pub participation: Participation,
    pub plays: Vec<PlayedToken>,
}

impl Harness {
    pub fn new(contest: TokenPolicy, task: TokenPolicy) -> Self {
        Self::with_schedule(Schedule::fixed(t0()), None, contest, task)
    }

    pub fn with_schedule(
        schedule: Schedule,
        starting_time: Option<Timestamp>,
        contest: TokenPolicy,
        task: TokenPolicy,
    ) -> Self {
        let mut tokens = ContestTokens::new(schedule, contest);
        tokens.add_task(TASK, task);
        tokens.add_task(OTHER_TASK, TokenPolicy::infinite());
        Self {
            contest: tokens,
            participation: Participation {
                name: PARTICIPANT.to_string(),
                starting_time,
            },
            plays: Vec::new(),
        }
    }

    fn add(&mut self, task: &str, secs: i64) {
        let n = self.plays.len();
        self.plays.push(PlayedToken {
            participant: PARTICIPANT.to_string(),
            task: task.to_string(),
            submission: format!("sub-{n}"),
            timestamp: at(secs),
        });
    }

    pub fn add_token_to_task(&mut self, secs: i64) {
        self.add(TASK, secs);
    }

    pub fn add_token_to_contest(&mut self, secs: i64) {
        self.add(OTHER_TASK, secs);
    }

    pub fn call(&self, secs: i64) -> Availability {
        self.contest
            .tokens_available(&self.participation, TASK, &self.plays, at(secs))
            .expect("token query failed")
    }

    pub fn ledger(&self) -> TokenLedger {
        TokenLedger::from_plays(self.plays.clone())
    }
}

/// Shorthand for an expected answer.
pub fn answer(available: Tokens, next: Option<i64>, cooldown: Option<i64>) -> Availability {
    Availability {
        available,
        next_generation: next.map(at),
        cooldown_expiration: cooldown.map(at),
    }
}
