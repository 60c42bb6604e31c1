//! Preview command
//!
//! Handles `crier preview`: runs the same theme selection, generation, and
//! duplicate screening as a real run, but publishes nothing and records
//! nothing. Requires only the OpenAI key, no platform credentials.

use anyhow::Result;
use chrono::NaiveDate;
use crier_core::catalog::Category;
use crier_core::pipeline::GenerationOutcome;

use crate::app::{self, InitOptions};
use crate::commands::run::build_pipeline;

/// Generate and print the post that a run on `date` would produce
pub async fn run(date: NaiveDate, category: Option<Category>) -> Result<()> {
    let ctx = app::initialize(InitOptions::command())?;

    // No publishers: preview never touches the platforms
    let pipeline = build_pipeline(&ctx, Vec::new())?;

    println!("Previewing post for {}...", date);
    let report = pipeline.compose_preview(date, category).await;

    println!();
    println!("Category: {}", report.category);
    if let Some(holiday) = &report.holiday {
        println!("Holiday:  {}", holiday);
    }
    if report.outcome == GenerationOutcome::Fallback {
        println!("Note:     generation failed, showing the fallback post");
    }
    println!();
    println!("{}", report.content);
    println!();
    println!("{}", report.hashtags.join(" "));

    Ok(())
}
