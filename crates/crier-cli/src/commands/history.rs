//! History command
//!
//! Handles `crier history`: prints the most recent post records.

use anyhow::{Context, Result};
use crier_adapters::JsonHistoryStore;
use crier_core::history::PostHistory;
use crier_core::ports::HistoryStorePort;

use crate::app::{self, InitOptions};

/// Print the most recent `count` post records, oldest first
pub async fn run(count: usize) -> Result<()> {
    let ctx = app::initialize(InitOptions::command())?;
    let store = JsonHistoryStore::new(ctx.directories().history_path());

    let records = store.load().await.context("Failed to load post history")?;
    let history = PostHistory::new(records);

    if history.is_empty() {
        println!("No posts recorded yet.");
        return Ok(());
    }

    println!(
        "Showing {} of {} recorded posts:",
        history.recent(count).len(),
        history.len()
    );

    for record in history.recent(count) {
        println!();
        print!("{}  {}", record.date, record.category);
        if let Some(holiday) = &record.holiday {
            print!("  ({})", holiday);
        }
        if record.fallback {
            print!("  [fallback]");
        }
        println!();
        println!("  {}", record.content.replace('\n', "\n  "));
        if !record.hashtags.is_empty() {
            println!("  {}", record.hashtags.join(" "));
        }
    }

    Ok(())
}
