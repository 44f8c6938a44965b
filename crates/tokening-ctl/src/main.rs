//! tokening-ctl — command-line front end for contest token rules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokening_core::config::TokeningConfig;

mod cmd;

use cmd::context::Ctx;

fn print_usage() {
    println!("Usage: tokening-ctl [options] <command>");
    println!();
    println!("Commands:");
    println!("  policy                                  Show contest and task token policies");
    println!("  status <participant> <task>             Show tokens available on a task");
    println!("  play <participant> <task> <submission>  Play a token on a submission");
    println!("  init                                    Write a default config if none exists (honours --config)");
    println!();
    println!("Options:");
    println!("  --config <path>   Config file (default: $TOKENING_CONFIG or ~/.config/tokening/config.toml)");
    println!("  --plays <path>    Play log (default: ~/.local/share/tokening/plays.json, one writer at a time)");
    println!("  --at <time>       Evaluate at an RFC 3339 instant instead of now");
    println!("  --json            Print status as JSON");
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_path: Option<PathBuf> = None;
    let mut plays_path: Option<PathBuf> = None;
    let mut at: Option<String> = None;
    let mut json = false;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).context("--config requires a value")?.into());
            }
            "--plays" => {
                i += 1;
                plays_path = Some(args.get(i).context("--plays requires a value")?.into());
            }
            "--at" => {
                i += 1;
                at = Some(args.get(i).context("--at requires a value")?.clone());
            }
            "--json" => json = true,
            other => remaining.push(other),
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["help"] | ["--help"] | ["-h"] => {
            print_usage();
            return Ok(());
        }
        ["init"] => {
            let path = match config_path.as_deref() {
                Some(path) => TokeningConfig::write_default_to(path)?,
                None => TokeningConfig::write_default_if_missing()?,
            };
            println!("Config at {}", path.display());
            return Ok(());
        }
        _ => {}
    }

    let ctx = Ctx::load(config_path.as_deref(), plays_path.as_deref())?;
    tracing::debug!(plays = %ctx.plays_path.display(), "context loaded");

    match remaining.as_slice() {
        ["policy"] | [] => cmd::policy::cmd_policy(&ctx),
        ["status", participant, task] => {
            cmd::status::cmd_status(&ctx, participant, task, at.as_deref(), json)
        }
        ["play", participant, task, submission] => {
            cmd::play::cmd_play(&ctx, participant, task, submission, at.as_deref())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
