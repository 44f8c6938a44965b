//! When a participation starts accruing tokens.
//!
//! Fixed-window contests start everyone at the contest start. Per-user
//! contests start each participant at their own starting time, and a
//! participant who has not started has no tokens at all.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokening_core::config::{ContestConfig, ParticipantConfig};
use tokening_core::Timestamp;

/// One contestant's enrolment in the contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub name: String,
    /// Set once the participant opens their window in a per-user contest.
    pub starting_time: Option<Timestamp>,
}

impl From<&ParticipantConfig> for Participation {
    fn from(config: &ParticipantConfig) -> Self {
        Self {
            name: config.name.clone(),
            starting_time: config.starting_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub contest_start: Timestamp,
    /// Length of each participant's own window, if the contest has one.
    pub per_user_time: Option<Duration>,
}

impl Schedule {
    pub fn fixed(contest_start: Timestamp) -> Self {
        Self {
            contest_start,
            per_user_time: None,
        }
    }

    pub fn per_user(contest_start: Timestamp, window: Duration) -> Self {
        Self {
            contest_start,
            per_user_time: Some(window),
        }
    }

    /// Instant from which `participation` accrues tokens. `None` when the
    /// participant has not opened their window yet.
    pub fn token_start(&self, participation: &Participation) -> Option<Timestamp> {
        match self.per_user_time {
            Some(_) => participation.starting_time,
            None => Some(self.contest_start),
        }
    }
}

impl From<&ContestConfig> for Schedule {
    fn from(config: &ContestConfig) -> Self {
        Self {
            contest_start: config.start,
            per_user_time: config.per_user_time(),
        }
    }
}
