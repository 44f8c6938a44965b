//! Shared loading for CLI commands: config, contest rules, play log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokening_core::config::{data_dir, TokeningConfig};
use tokening_core::Timestamp;
use tokening_services::{ContestTokens, TokenLedger};

pub struct Ctx {
    pub config: TokeningConfig,
    pub contest: ContestTokens,
    pub plays_path: PathBuf,
}

impl Ctx {
    pub fn load(config_path: Option<&Path>, plays_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => TokeningConfig::load_from(path),
            None => TokeningConfig::load(),
        }
        .context("failed to load config")?;
        let contest = ContestTokens::from_config(&config);
        let plays_path = plays_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir().join("plays.json"));
        Ok(Self {
            config,
            contest,
            plays_path,
        })
    }

    /// Missing play log = nothing played yet.
    pub fn ledger(&self) -> Result<TokenLedger> {
        if !self.plays_path.exists() {
            return Ok(TokenLedger::new());
        }
        let text = std::fs::read_to_string(&self.plays_path)
            .with_context(|| format!("failed to read {}", self.plays_path.display()))?;
        TokenLedger::from_json(&text)
            .with_context(|| format!("failed to parse {}", self.plays_path.display()))
    }

    /// Single writer: two `play` invocations racing on the same log can
    /// both pass the check, and the later rename wins.
    pub fn save_ledger(&self, ledger: &TokenLedger) -> Result<()> {
        if let Some(parent) = self.plays_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        ledger
            .save_to(&self.plays_path)
            .with_context(|| format!("failed to write {}", self.plays_path.display()))
    }
}

/// `--at` value, or the current time.
pub fn resolve_now(at: Option<&str>) -> Result<Timestamp> {
    match at {
        Some(text) => text
            .parse()
            .with_context(|| format!("--at must be an RFC 3339 timestamp, got {text}")),
        None => Ok(chrono::Utc::now()),
    }
}

pub fn fmt_time(at: Option<Timestamp>) -> String {
    at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string())
}
