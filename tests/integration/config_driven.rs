//! Contests described by config files and JSON play logs.

use crate::*;

use anyhow::{Context, Result};
use tokening_core::config::TokeningConfig;

const CONTEST: &str = r#"
[contest]
start = "2024-03-01T09:00:00Z"

[contest.tokens]
mode = "finite"
initial = 3
gen_number = 1
gen_interval_secs = 2
gen_max = 6
max_number = 3
min_interval_secs = 2

[[tasks]]
name = "sum"
tokens = { mode = "finite", initial = 1, gen_number = 2, gen_interval_secs = 2, min_interval_secs = 4 }

[[tasks]]
name = "graph"

[[participants]]
name = "alice"
"#;

const PLAYS: &str = r#"[
  { "participant": "alice", "task": "graph", "submission": "g1", "timestamp": "2024-03-01T09:00:02Z" },
  { "participant": "alice", "task": "sum",   "submission": "s1", "timestamp": "2024-03-01T09:00:01Z" }
]"#;

fn load() -> Result<(ContestTokens, TokenLedger)> {
    let config = TokeningConfig::parse(CONTEST).context("parse contest")?;
    config.validate()?;
    let ledger = TokenLedger::from_json(PLAYS).context("parse plays")?;
    Ok((ContestTokens::from_config(&config), ledger))
}

#[test]
fn test_config_policies_drive_answers() -> Result<()> {
    let (contest, ledger) = load()?;
    let alice = contest.participation(PARTICIPANT)?.clone();

    // Unsorted log: the service layer orders it before replaying.
    let now = ledger.availability(&contest, &alice, TASK, at(3))?;
    assert_eq!(now, answer(Tokens::Finite(1), None, Some(5)));

    // Only one contest token left, and the task pool has plenty.
    let later = ledger.availability(&contest, &alice, TASK, at(7))?;
    assert_eq!(later, answer(Tokens::Finite(1), None, None));

    ledger.accept_token(&contest, &alice, TASK, "s2", at(7))?;
    let done = ledger.availability(&contest, &alice, TASK, at(8))?;
    assert_eq!(done.available, Tokens::Finite(0));
    assert!(!done.can_play());
    Ok(())
}

#[test]
fn test_unknown_names_are_reported() -> Result<()> {
    let (contest, ledger) = load()?;
    assert!(contest.participation("mallory").is_err());

    let alice = contest.participation(PARTICIPANT)?.clone();
    assert!(ledger.availability(&contest, &alice, "missing", at(3)).is_err());
    Ok(())
}

#[test]
fn test_invalid_policy_is_rejected() {
    let text = r#"
        [contest.tokens]
        mode = "finite"
        initial = 5
        gen_max = 3
    "#;
    let config = TokeningConfig::parse(text).unwrap();
    assert!(config.validate().is_err());
}
