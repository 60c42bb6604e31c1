//! Crier CLI - Scheduled social media agent
//!
//! Main entry point for the Crier application.

mod app;
mod commands;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crier_core::catalog::Category;

#[derive(Parser)]
#[command(
    name = "crier",
    version,
    about = "Automated daily social media posting agent"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate today's post, publish it, and record it in history
    Run {
        /// Date to post for (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate post text without publishing or recording anything
    Preview {
        /// Date to preview (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Category to preview instead of the next one in rotation
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show which holiday, if any, a date resolves to
    Holiday {
        /// Date to check (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show recent post history
    History {
        /// Number of recent posts to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { date } => commands::run::run(date.unwrap_or_else(today)).await,
        Commands::Preview { date, category } => {
            commands::preview::run(date.unwrap_or_else(today), category).await
        }
        Commands::Holiday { date } => commands::holiday::run(date.unwrap_or_else(today)),
        Commands::History { count } => commands::history::run(count).await,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
