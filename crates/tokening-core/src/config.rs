//! Configuration system for tokening.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $TOKENING_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/tokening/config.toml
//!   3. ~/.config/tokening/config.toml

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::policy::{Timestamp, TokenPolicy};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokeningConfig {
    pub contest: ContestConfig,
    pub tasks: Vec<TaskConfig>,
    pub participants: Vec<ParticipantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    /// Contest start. Tokens accrue from here unless `per_user_time` is set.
    pub start: Timestamp,
    /// Per-user time window in seconds. When set and non-zero, each
    /// participant accrues tokens from their own starting time.
    pub per_user_time_secs: Option<u64>,
    /// Contest-wide token pool.
    pub tokens: TokenMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    /// Task-wide token pool.
    #[serde(default)]
    pub tokens: TokenMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    pub name: String,
    /// Only meaningful for per-user-time contests. Absent = not started.
    #[serde(default)]
    pub starting_time: Option<Timestamp>,
}

/// How one pool hands out tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TokenMode {
    /// No tokens, ever.
    Disabled,
    /// Finite tokens, generated periodically.
    Finite(FiniteTokens),
    /// Always a token available. Limits and cooldowns do not apply.
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiniteTokens {
    /// Tokens held at start.
    pub initial: u32,
    /// Tokens added at the end of every generation period.
    pub gen_number: u32,
    /// Generation period length in seconds. Must be > 0.
    pub gen_interval_secs: u64,
    /// Cap on tokens held at once. Must be > 0 and >= initial.
    pub gen_max: Option<u32>,
    /// Cap on tokens used in total. Must be > 0.
    pub max_number: Option<u32>,
    /// Minimum seconds between two uses.
    pub min_interval_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for TokeningConfig {
    fn default() -> Self {
        Self {
            contest: ContestConfig::default(),
            tasks: Vec::new(),
            participants: Vec::new(),
        }
    }
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            start: DateTime::from_timestamp(946_684_800, 0).unwrap_or_default(), // 2000-01-01
            per_user_time_secs: None,
            tokens: TokenMode::default(),
        }
    }
}

impl Default for TokenMode {
    fn default() -> Self {
        TokenMode::Infinite
    }
}

impl Default for FiniteTokens {
    fn default() -> Self {
        Self {
            initial: 2,
            gen_number: 2,
            gen_interval_secs: 30 * 60,
            gen_max: None,
            max_number: None,
            min_interval_secs: 0,
        }
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

impl TokenMode {
    /// Check the constraints the engine relies on but does not enforce.
    pub fn validate(&self, pool: &str) -> Result<(), ConfigError> {
        let TokenMode::Finite(f) = self else {
            return Ok(());
        };
        let invalid = |reason: &str| ConfigError::InvalidPolicy(pool.to_string(), reason.to_string());
        if f.gen_interval_secs == 0 {
            return Err(invalid("gen_interval_secs must be positive"));
        }
        if f.gen_max == Some(0) {
            return Err(invalid("gen_max must be positive"));
        }
        if f.max_number == Some(0) {
            return Err(invalid("max_number must be positive"));
        }
        if let Some(max) = f.gen_max {
            if f.initial > max {
                return Err(invalid("initial exceeds gen_max"));
            }
        }
        Ok(())
    }

    /// The engine policy for this mode.
    pub fn policy(&self) -> TokenPolicy {
        match self {
            TokenMode::Disabled => TokenPolicy::disabled(),
            TokenMode::Infinite => TokenPolicy::infinite(),
            TokenMode::Finite(f) => TokenPolicy {
                initial: Some(f.initial),
                max: f.gen_max,
                total: f.max_number,
                min_interval: Duration::from_secs(f.min_interval_secs),
                gen_interval: Duration::from_secs(f.gen_interval_secs),
                gen_amount: f.gen_number,
            },
        }
    }
}

impl ContestConfig {
    pub fn per_user_time(&self) -> Option<Duration> {
        self.per_user_time_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("tokening")
}

pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".local").join("share"))
        .join("tokening")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
    #[error("invalid token policy for {0}: {1}")]
    InvalidPolicy(String, String),
    #[error("duplicate task name {0}")]
    DuplicateTask(String),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl TokeningConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::file_path())
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
            Self::parse(&text).map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?
        } else {
            TokeningConfig::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("TOKENING_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        Self::write_default_to(&Self::file_path())
    }

    /// Write default config to `path` unless something is already there.
    pub fn write_default_to(path: &std::path::Path) -> Result<PathBuf, ConfigError> {
        let path = path.to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&TokeningConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text)
                .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Reject policies the database layer of a contest system would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contest.tokens.validate("contest")?;
        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.name.as_str()) {
                return Err(ConfigError::DuplicateTask(task.name.clone()));
            }
            task.tokens.validate(&task.name)?;
        }
        Ok(())
    }

    /// Apply TOKENING_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TOKENING_CONTEST__START") {
            if let Ok(start) = v.parse() {
                self.contest.start = start;
            }
        }
        if let Ok(v) = std::env::var("TOKENING_CONTEST__PER_USER_TIME_SECS") {
            self.contest.per_user_time_secs = v.parse().ok();
        }
    }
}
