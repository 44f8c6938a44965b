//! In-memory record of played tokens, keyed by participation.
//!
//! `accept_token` queries availability and commits the play while holding
//! the participation's map entry, so two requests from the same
//! participation cannot both pass the check on the same snapshot.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tokening_core::{Availability, Timestamp};

use crate::contest::ContestTokens;
use crate::error::TokenRejection;
use crate::gate::check_play;
use crate::schedule::Participation;

/// One token played on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedToken {
    pub participant: String,
    pub task: String,
    pub submission: String,
    pub timestamp: Timestamp,
}

#[derive(Clone, Default)]
pub struct TokenLedger {
    /// participant name → plays, in insertion order
    plays: Arc<DashMap<String, Vec<PlayedToken>>>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self {
            plays: Arc::new(DashMap::new()),
        }
    }

    /// Seed the ledger with previously recorded plays. No checks are made.
    pub fn from_plays(plays: impl IntoIterator<Item = PlayedToken>) -> Self {
        let ledger = Self::new();
        for play in plays {
            ledger
                .plays
                .entry(play.participant.clone())
                .or_default()
                .push(play);
        }
        ledger
    }

    /// Parse a JSON array of plays.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let plays: Vec<PlayedToken> = serde_json::from_str(text)?;
        Ok(Self::from_plays(plays))
    }

    /// Every play, ordered by timestamp.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.all_plays())
    }

    /// Replace the play log at `path` atomically: the new log is written
    /// to a sibling temp file, synced, then renamed over the old one.
    /// A crash leaves either the old log or the new one, never a partial
    /// file. Concurrent writers are not coordinated.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let text = self.to_json().map_err(std::io::Error::other)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plays.json".to_string());
        let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));

        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, path).inspect_err(|_| {
            let _ = std::fs::remove_file(&tmp);
        })
    }

    pub fn plays_for(&self, participant: &str) -> Vec<PlayedToken> {
        self.plays
            .get(participant)
            .map(|plays| plays.clone())
            .unwrap_or_default()
    }

    pub fn all_plays(&self) -> Vec<PlayedToken> {
        let mut all: Vec<PlayedToken> = self
            .plays
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.participant.cmp(&b.participant))
        });
        all
    }

    pub fn has_token(&self, participant: &str, submission: &str) -> bool {
        self.plays
            .get(participant)
            .map(|plays| plays.iter().any(|p| p.submission == submission))
            .unwrap_or(false)
    }

    /// Read-only availability query against the recorded plays.
    pub fn availability(
        &self,
        contest: &ContestTokens,
        participation: &Participation,
        task: &str,
        now: Timestamp,
    ) -> Result<Availability, TokenRejection> {
        let plays = self.plays_for(&participation.name);
        contest
            .tokens_available(participation, task, &plays, now)
            .inspect_err(|e| {
                tracing::error!(participant = %participation.name, task, error = %e, "token query failed");
            })
    }

    /// Check and record a token play on `submission`.
    pub fn accept_token(
        &self,
        contest: &ContestTokens,
        participation: &Participation,
        task: &str,
        submission: &str,
        now: Timestamp,
    ) -> Result<PlayedToken, TokenRejection> {
        let mut plays = self.plays.entry(participation.name.clone()).or_default();

        let availability = contest.tokens_available(participation, task, &plays, now)?;
        let already_played = plays.iter().any(|p| p.submission == submission);
        if let Err(rejection) = check_play(&availability, submission, already_played) {
            tracing::warn!(
                participant = %participation.name,
                task,
                submission,
                reason = %rejection,
                "token request refused"
            );
            return Err(rejection);
        }

        let play = PlayedToken {
            participant: participation.name.clone(),
            task: task.to_string(),
            submission: submission.to_string(),
            timestamp: now,
        };
        plays.push(play.clone());
        tracing::info!(
            participant = %participation.name,
            task,
            submission,
            available = %availability.available,
            "token played"
        );
        Ok(play)
    }
}
