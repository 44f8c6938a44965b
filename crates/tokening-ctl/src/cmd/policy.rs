//! Print the resolved pool policies.

use anyhow::Result;
use tokening_core::TokenPolicy;

use super::context::Ctx;

fn print_policy(name: &str, policy: &TokenPolicy) {
    println!("  ┌─ {}", name);
    if !policy.is_enabled() {
        println!("  └─ disabled");
        return;
    }
    if policy.is_infinite() {
        println!("  │  infinite");
        println!("  └─ min interval : {}s", policy.min_interval.as_secs());
        return;
    }
    let opt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    println!("  │  initial      : {}", opt(policy.initial));
    println!(
        "  │  generation   : +{} every {}s",
        policy.gen_amount,
        policy.gen_interval.as_secs()
    );
    println!("  │  max held     : {}", opt(policy.max));
    println!("  │  max total    : {}", opt(policy.total));
    println!("  └─ min interval : {}s", policy.min_interval.as_secs());
}

pub fn cmd_policy(ctx: &Ctx) -> Result<()> {
    let schedule = ctx.contest.schedule();

    println!("═══════════════════════════════════════");
    println!("  Token Policies");
    println!("═══════════════════════════════════════");
    println!("  Contest start    : {}", schedule.contest_start.to_rfc3339());
    match schedule.per_user_time {
        Some(window) => println!("  Per-user window  : {}s", window.as_secs()),
        None => println!("  Per-user window  : -"),
    }
    println!("  Participants     : {}", ctx.config.participants.len());
    println!();

    print_policy("contest", ctx.contest.contest_policy());
    for name in ctx.contest.task_names() {
        print_policy(name, ctx.contest.task_policy(name)?);
    }

    Ok(())
}
