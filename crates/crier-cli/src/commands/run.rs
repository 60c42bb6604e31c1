//! Daily publishing command
//!
//! Handles `crier run`: generates the day's post, publishes it to every
//! configured platform, and records it in history.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use crier_adapters::{DalleAdapter, FacebookAdapter, InstagramAdapter, JsonHistoryStore, OpenAiAdapter};
use crier_core::api_key::{ApiKeyManager, SocialCredentials};
use crier_core::pipeline::{GenerationOutcome, PipelineError, PostPipeline, RunReport};
use crier_core::ports::publish::{Platform, PublisherPort};
use std::sync::Arc;
use tracing::warn;

use crate::app::{self, AppContext, InitOptions};

/// Execute a full publishing run for the given date
pub async fn run(date: NaiveDate) -> Result<()> {
    let ctx = app::initialize(InitOptions::publishing())?;
    let publishers = build_publishers(&ctx);

    if publishers.is_empty() {
        bail!(
            "No platform credentials are configured. Set FACEBOOK_ACCESS_TOKEN and \
             FACEBOOK_PAGE_ID (and INSTAGRAM_BUSINESS_ACCOUNT_ID for Instagram)."
        );
    }

    let pipeline = build_pipeline(&ctx, publishers)?;

    println!("Generating post for {}...", date);
    match pipeline.run_once(date).await {
        Ok(report) => {
            print_report(&report);
            if !report.any_published() {
                bail!("Publishing failed on every platform");
            }
            Ok(())
        }
        Err(PipelineError::AlreadyPosted(date)) => {
            println!("A post for {} is already recorded. Nothing to do.", date);
            Ok(())
        }
    }
}

/// Builds the pipeline from configuration and real adapters
pub(crate) fn build_pipeline(
    ctx: &AppContext,
    publishers: Vec<Arc<dyn PublisherPort>>,
) -> Result<PostPipeline<OpenAiAdapter, DalleAdapter, JsonHistoryStore>> {
    let api_key = match ApiKeyManager::load_openai_key() {
        Ok(key) => key,
        Err(_) => bail!("{}", ApiKeyManager::missing_key_guidance()),
    };

    let ai = &ctx.config.ai;
    let content = Arc::new(OpenAiAdapter::new(
        api_key.clone(),
        ai.text_model.clone(),
        ai.max_tokens,
        ai.temperature,
    ));
    let image = Arc::new(DalleAdapter::new(
        api_key,
        ai.image_model.clone(),
        ctx.directories().images_dir(),
    ));
    let history = Arc::new(JsonHistoryStore::new(ctx.directories().history_path()));

    Ok(PostPipeline::new(
        content,
        image,
        history,
        publishers,
        Arc::clone(&ctx.config),
    ))
}

/// Builds one publisher per configured platform with available credentials
///
/// A platform listed in configuration but missing credentials is skipped
/// with a warning instead of failing the run.
fn build_publishers(ctx: &AppContext) -> Vec<Arc<dyn PublisherPort>> {
    let credentials = SocialCredentials::from_env();
    let mut publishers: Vec<Arc<dyn PublisherPort>> = Vec::new();

    for platform in &ctx.config.publishing.platforms {
        match platform {
            Platform::Facebook => {
                if credentials.facebook_enabled() {
                    let token = credentials.access_token.clone().unwrap();
                    let page_id = credentials.page_id.clone().unwrap();
                    publishers.push(Arc::new(FacebookAdapter::new(token, page_id)));
                } else {
                    warn!("Facebook is configured but its credentials are not set, skipping");
                    eprintln!("Skipping Facebook: credentials not configured");
                }
            }
            Platform::Instagram => {
                if credentials.instagram_enabled() {
                    let token = credentials.access_token.clone().unwrap();
                    let page_id = credentials.page_id.clone().unwrap();
                    let account_id = credentials.instagram_account_id.clone().unwrap();
                    publishers.push(Arc::new(InstagramAdapter::new(token, page_id, account_id)));
                } else {
                    warn!("Instagram is configured but its credentials are not set, skipping");
                    eprintln!("Skipping Instagram: credentials not configured");
                }
            }
        }
    }

    publishers
}

/// Prints a run report to stdout
fn print_report(report: &RunReport) {
    println!();
    println!("Category: {}", report.category);
    if let Some(holiday) = &report.holiday {
        println!("Holiday:  {}", holiday);
    }
    if report.outcome == GenerationOutcome::Fallback {
        println!("Note:     generated content was unusable, posted the fallback");
    }
    println!();
    println!("{}", report.content);
    println!();
    println!("{}", report.hashtags.join(" "));
    println!();

    match &report.image_path {
        Some(path) => println!("Image:    {}", path.display()),
        None => println!("Image:    none (posted text only)"),
    }

    for outcome in &report.publishes {
        match (&outcome.post_id, &outcome.error) {
            (Some(id), _) => println!("{}: published ({})", outcome.platform, id),
            (None, Some(error)) => println!("{}: FAILED - {}", outcome.platform, error),
            (None, None) => println!("{}: not attempted", outcome.platform),
        }
    }

    if !report.history_recorded {
        eprintln!("Warning: the post was not recorded in history; tomorrow's run may repeat it");
    }
}
