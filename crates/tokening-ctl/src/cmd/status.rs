//! Token availability for one participant on one task.

use anyhow::{Context, Result};

use super::context::{fmt_time, resolve_now, Ctx};

pub fn cmd_status(ctx: &Ctx, participant: &str, task: &str, at: Option<&str>, json: bool) -> Result<()> {
    let now = resolve_now(at)?;
    let participation = ctx.contest.participation(participant)?;
    let ledger = ctx.ledger()?;
    let answer = ledger
        .availability(&ctx.contest, participation, task, now)
        .with_context(|| format!("cannot compute tokens for {participant} on {task}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("═══════════════════════════════════════");
    println!("  Tokens — {} on {}", participant, task);
    println!("═══════════════════════════════════════");
    println!("  At               : {}", now.to_rfc3339());
    println!("  Available        : {}", answer.available);
    println!("  Next generation  : {}", fmt_time(answer.next_generation));
    println!("  Cooldown until   : {}", fmt_time(answer.cooldown_expiration));
    println!(
        "  Can play now     : {}",
        if answer.can_play() { "yes" } else { "no" }
    );

    Ok(())
}
