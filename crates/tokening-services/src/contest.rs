//! Token rules of one contest: the contest pool, one pool per task, and the
//! participations that draw from them.

use std::collections::HashMap;

use tokening_core::config::TokeningConfig;
use tokening_core::{tokens_available, Availability, Timestamp, TokenPolicy};

use crate::error::TokenRejection;
use crate::ledger::PlayedToken;
use crate::schedule::{Participation, Schedule};

#[derive(Debug, Clone)]
pub struct ContestTokens {
    schedule: Schedule,
    contest: TokenPolicy,
    tasks: HashMap<String, TokenPolicy>,
    participations: HashMap<String, Participation>,
}

impl ContestTokens {
    pub fn new(schedule: Schedule, contest: TokenPolicy) -> Self {
        Self {
            schedule,
            contest,
            tasks: HashMap::new(),
            participations: HashMap::new(),
        }
    }

    /// Build from a validated config.
    pub fn from_config(config: &TokeningConfig) -> Self {
        let mut tokens = Self::new(Schedule::from(&config.contest), config.contest.tokens.policy());
        for task in &config.tasks {
            tokens.add_task(&task.name, task.tokens.policy());
        }
        for participant in &config.participants {
            tokens.add_participation(Participation::from(participant));
        }
        tokens
    }

    pub fn add_task(&mut self, name: &str, policy: TokenPolicy) {
        self.tasks.insert(name.to_string(), policy);
    }

    pub fn add_participation(&mut self, participation: Participation) {
        self.participations
            .insert(participation.name.clone(), participation);
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn contest_policy(&self) -> &TokenPolicy {
        &self.contest
    }

    pub fn task_policy(&self, task: &str) -> Result<&TokenPolicy, TokenRejection> {
        self.tasks
            .get(task)
            .ok_or_else(|| TokenRejection::UnknownTask(task.to_string()))
    }

    /// Task names, sorted.
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn participation(&self, name: &str) -> Result<&Participation, TokenRejection> {
        self.participations
            .get(name)
            .ok_or_else(|| TokenRejection::UnknownParticipation(name.to_string()))
    }

    /// Tokens `participation` can play on `task` at `now`.
    ///
    /// `plays` are the participation's recorded plays on any task, in any
    /// order. Plays after `now` are ignored.
    pub fn tokens_available(
        &self,
        participation: &Participation,
        task: &str,
        plays: &[PlayedToken],
        now: Timestamp,
    ) -> Result<Availability, TokenRejection> {
        let task_policy = self.task_policy(task)?;
        let Some(start) = self.schedule.token_start(participation) else {
            return Ok(Availability::none());
        };

        let (contest_history, task_history) = partition(plays, task, now);
        let availability = tokens_available(
            &self.contest,
            task_policy,
            start,
            &contest_history,
            &task_history,
            now,
        )?;
        Ok(availability)
    }
}

/// Contest-wide and task-wide histories, both sorted, up to `now`.
fn partition(plays: &[PlayedToken], task: &str, now: Timestamp) -> (Vec<Timestamp>, Vec<Timestamp>) {
    let mut past: Vec<&PlayedToken> = plays.iter().filter(|p| p.timestamp <= now).collect();
    past.sort_by_key(|p| p.timestamp);

    let contest = past.iter().map(|p| p.timestamp).collect();
    let task = past
        .iter()
        .filter(|p| p.task == task)
        .map(|p| p.timestamp)
        .collect();
    (contest, task)
}
