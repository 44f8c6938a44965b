//! Play a token on a submission and append it to the play log.

use anyhow::Result;

use super::context::{resolve_now, Ctx};

pub fn cmd_play(
    ctx: &Ctx,
    participant: &str,
    task: &str,
    submission: &str,
    at: Option<&str>,
) -> Result<()> {
    let now = resolve_now(at)?;
    let participation = ctx.contest.participation(participant)?;
    let ledger = ctx.ledger()?;

    let play = ledger.accept_token(&ctx.contest, participation, task, submission, now)?;
    ctx.save_ledger(&ledger)?;

    println!(
        "✓ Token played on {} ({} / {}) at {}",
        play.submission,
        play.participant,
        play.task,
        play.timestamp.to_rfc3339()
    );
    Ok(())
}
