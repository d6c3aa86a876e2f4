//! Apply a JSONL stream of actions to a snapshot and print the result.
//!
//! Usage: replay < actions.jsonl
//! Starts from $SNAPSHOT_PATH when set, otherwise from an empty book.
//! Decisions are stamped with $REPLAY_DATE (YYYY-MM-DD) when given so two
//! replays of the same stream hash identically.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use thesisbook::config::{save_snapshot, Config};
use thesisbook::engine::actions::Action;
use thesisbook::store::{FixedClock, Store};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut store = Store::from_config(&cfg)?.with_audit(true);
    if let Ok(date) = std::env::var("REPLAY_DATE") {
        let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("REPLAY_DATE {}", date))?;
        store = store.with_clock(FixedClock(day));
    }

    let stdin = io::stdin();
    let mut applied = 0u64;
    let mut skipped = 0u64;
    let mut violations = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let action: Action = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(err) => {
                eprintln!("bad action json: {}", err);
                skipped += 1;
                continue;
            }
        };
        if store.dispatch(action).changed {
            applied += 1;
        }
        violations += store.violations().len();
    }

    let state = store.snapshot();
    if let Some(path) = &cfg.snapshot_path {
        save_snapshot(path, &state)?;
    }
    println!(
        "seq={} theses={} applied={} skipped={} violations={} state_hash={:016x}",
        state.seq,
        state.theses.len(),
        applied,
        skipped,
        violations,
        state.hash()
    );
    if violations > 0 {
        std::process::exit(2);
    }
    Ok(())
}
