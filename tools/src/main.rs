//! relay-runner: headless driver for the GoldBook relay.
//!
//! Stands in for the chat transport: reads one message per line on
//! stdin, runs it through the parse-then-write pipeline, and prints
//! the reply line when one is produced. On EOF it prints the running
//! totals.
//!
//! Usage:
//!   relay-runner --db ledger.db
//!   relay-runner --memory --jsonl

use anyhow::Result;
use goldbook_core::{
    config::RelayConfig,
    relay::Relay,
    store::{MemoryStore, SqliteStore, TableStore},
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let config = RelayConfig::from_env();
    let args: Vec<String> = env::args().collect();
    let memory = args.iter().any(|a| a == "--memory");
    let jsonl = args.iter().any(|a| a == "--jsonl");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].clone())
        .unwrap_or(config.db_path);

    if memory {
        run_loop(Relay::new(MemoryStore::new())?, jsonl)
    } else {
        log::info!("opening store at {db}");
        run_loop(Relay::new(SqliteStore::open(&db)?)?, jsonl)
    }
}

fn run_loop<S: TableStore>(mut relay: Relay<S>, jsonl: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let reply = relay.handle_message(&line);
        if jsonl {
            writeln!(stdout, "{}", serde_json::json!({ "reply": reply }))?;
            stdout.flush()?;
        } else if let Some(reply) = reply {
            writeln!(stdout, "{reply}")?;
        }
    }

    if !jsonl {
        print_totals(&relay)?;
    }
    Ok(())
}

fn print_totals<S: TableStore>(relay: &Relay<S>) -> Result<()> {
    let rows = relay.ledger.store.read_all_rows(relay.ledger.totals())?;

    println!();
    println!("=== TOTAL PER SERVER ===");
    if rows.len() <= 1 {
        println!("  (no submissions recorded)");
        return Ok(());
    }
    for row in rows.iter().skip(1) {
        let server = row.first().map(String::as_str).unwrap_or("?");
        let formatted = row.get(2).map(String::as_str).unwrap_or("?");
        println!("  {server:<16} {formatted}");
    }
    Ok(())
}
