//! Daily posting pipeline
//!
//! Orchestrates one scheduled run: resolve today's holiday, pick a category,
//! generate text with duplicate screening, generate an image, publish to each
//! configured platform, and append the result to history.
//!
//! Failure policy: generation trouble degrades to the category's fallback
//! post, a publish failure on one platform never blocks the others, and a
//! history append failure is reported on the run rather than aborting it.

use crate::catalog::{Category, BRAND_HASHTAGS};
use crate::config::Config;
use crate::history::{PostHistory, PostRecord};
use crate::holiday::{HolidayCalendar, ResolvedHoliday};
use crate::ports::content::ContentGeneratorPort;
use crate::ports::image::{ImageGeneratorPort, ImageRequest};
use crate::ports::publish::{OutboundPost, Platform, PublisherPort};
use crate::ports::HistoryStorePort;
use crate::prompt::PromptBuilder;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// How the accepted post text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The content generator produced novel text within the retry cap
    Generated,
    /// The retry cap was exhausted and the pre-authored fallback was used
    Fallback,
}

/// Result of one publish attempt
#[derive(Debug, Clone)]
pub struct PlatformOutcome {
    /// Platform attempted
    pub platform: Platform,
    /// Platform-assigned post ID on success
    pub post_id: Option<String>,
    /// Error description on failure
    pub error: Option<String>,
}

impl PlatformOutcome {
    /// True when the platform accepted the post
    pub fn succeeded(&self) -> bool {
        self.post_id.is_some()
    }
}

/// Summary of one completed pipeline run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Date the post was generated for
    pub date: NaiveDate,
    /// Category recorded for the post
    pub category: Category,
    /// Accepted post body, without hashtags
    pub content: String,
    /// Hashtags attached to the post
    pub hashtags: Vec<String>,
    /// Holiday name when a holiday-themed post was generated
    pub holiday: Option<String>,
    /// Whether generated or fallback text was used
    pub outcome: GenerationOutcome,
    /// Locally stored image, when image generation succeeded
    pub image_path: Option<PathBuf>,
    /// One entry per attempted platform, in configuration order
    pub publishes: Vec<PlatformOutcome>,
    /// False when the history append failed; the next run may risk a repeat
    pub history_recorded: bool,
}

impl RunReport {
    /// True when at least one platform accepted the post
    pub fn any_published(&self) -> bool {
        self.publishes.iter().any(PlatformOutcome::succeeded)
    }
}

/// Errors that abort a pipeline run before any generation happens
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A post was already recorded for this date
    #[error("A post was already recorded for {0}")]
    AlreadyPosted(NaiveDate),
}

/// The daily posting pipeline
///
/// Publishers are held as trait objects because a run fans out to a
/// heterogeneous set of platforms.
pub struct PostPipeline<C, I, H>
where
    C: ContentGeneratorPort,
    I: ImageGeneratorPort,
    H: HistoryStorePort,
{
    content: Arc<C>,
    image: Arc<I>,
    history_store: Arc<H>,
    publishers: Vec<Arc<dyn PublisherPort>>,
    config: Arc<Config>,
    calendar: HolidayCalendar,
}

impl<C, I, H> PostPipeline<C, I, H>
where
    C: ContentGeneratorPort,
    I: ImageGeneratorPort,
    H: HistoryStorePort,
{
    /// Creates a pipeline from port implementations and configuration
    pub fn new(
        content: Arc<C>,
        image: Arc<I>,
        history_store: Arc<H>,
        publishers: Vec<Arc<dyn PublisherPort>>,
        config: Arc<Config>,
    ) -> Self {
        let calendar = HolidayCalendar::new(config.holidays.clone());
        Self {
            content,
            image,
            history_store,
            publishers,
            config,
            calendar,
        }
    }

    /// Executes one full run for the given date
    ///
    /// # Errors
    /// Returns `PipelineError::AlreadyPosted` when history already holds a
    /// record for `date`. All later failures degrade per the run policy and
    /// are reported through the returned `RunReport`.
    pub async fn run_once(&self, date: NaiveDate) -> Result<RunReport, PipelineError> {
        let history = self.load_history().await;
        if history.has_post_on(date) {
            return Err(PipelineError::AlreadyPosted(date));
        }

        let holiday = self.calendar.resolve(date);
        if let Some(ref holiday) = holiday {
            info!(holiday = %holiday.name, %date, "Generating holiday-themed post");
        }
        let category = history.next_category();

        let (content, outcome) = self
            .generate_with_retries(&history, category, holiday.as_ref())
            .await;

        // A fallback post is not holiday-themed, so drop the holiday tag
        let holiday = match outcome {
            GenerationOutcome::Generated => holiday,
            GenerationOutcome::Fallback => None,
        };

        let hashtags = compose_hashtags(category, holiday.as_ref(), outcome);
        let image_path = self.generate_image(category, holiday.as_ref()).await;

        let message = format!("{}\n\n{}", content, hashtags.join(" "));
        let outbound = OutboundPost {
            message,
            image: image_path.clone(),
        };

        let mut publishes = Vec::with_capacity(self.publishers.len());
        for publisher in &self.publishers {
            let platform = publisher.platform();
            match publisher.publish(&outbound).await {
                Ok(receipt) => {
                    info!(%platform, post_id = %receipt.post_id, "Published post");
                    publishes.push(PlatformOutcome {
                        platform,
                        post_id: Some(receipt.post_id),
                        error: None,
                    });
                }
                Err(e) => {
                    error!(%platform, error = %e, "Publishing failed");
                    publishes.push(PlatformOutcome {
                        platform,
                        post_id: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let record = PostRecord {
            date,
            category,
            content: content.clone(),
            hashtags: hashtags.clone(),
            holiday: holiday.as_ref().map(|h| h.name.clone()),
            fallback: outcome == GenerationOutcome::Fallback,
        };

        let history_recorded = match self.history_store.append(&record).await {
            Ok(()) => true,
            Err(e) => {
                // The post went out; only durability is at risk now
                error!(error = %e, "Failed to append post to history; next run may repeat content");
                false
            }
        };

        Ok(RunReport {
            date,
            category,
            content,
            hashtags,
            holiday: holiday.map(|h| h.name),
            outcome,
            image_path,
            publishes,
            history_recorded,
        })
    }

    /// Generates post text without publishing or recording anything
    ///
    /// Used by the preview command: same theme selection and duplicate
    /// screening as a real run, no side effects. A category override skips
    /// the rotation and previews that category directly.
    pub async fn compose_preview(&self, date: NaiveDate, category: Option<Category>) -> RunReport {
        let history = self.load_history().await;
        let holiday = self.calendar.resolve(date);
        let category = category.unwrap_or_else(|| history.next_category());

        let (content, outcome) = self
            .generate_with_retries(&history, category, holiday.as_ref())
            .await;
        let holiday = match outcome {
            GenerationOutcome::Generated => holiday,
            GenerationOutcome::Fallback => None,
        };
        let hashtags = compose_hashtags(category, holiday.as_ref(), outcome);

        RunReport {
            date,
            category,
            content,
            hashtags,
            holiday: holiday.map(|h| h.name),
            outcome,
            image_path: None,
            publishes: Vec::new(),
            history_recorded: false,
        }
    }

    /// Loads history, degrading to an empty view on storage failure
    async fn load_history(&self) -> PostHistory {
        match self.history_store.load().await {
            Ok(records) => PostHistory::new(records),
            Err(e) => {
                warn!(error = %e, "Failed to load post history; treating as first run");
                PostHistory::default()
            }
        }
    }

    /// Bounded retry loop over the content generator
    ///
    /// Each attempt is screened against recent history; after the cap the
    /// category's pre-authored fallback is used.
    async fn generate_with_retries(
        &self,
        history: &PostHistory,
        category: Category,
        holiday: Option<&ResolvedHoliday>,
    ) -> (String, GenerationOutcome) {
        let max_attempts = self.config.history.max_attempts;
        let lookback = self.config.history.lookback_window;
        let threshold = self.config.history.similarity_threshold;

        for attempt in 1..=max_attempts {
            let prompt = match holiday {
                Some(holiday) => PromptBuilder::holiday_prompt(&self.config.brand, holiday),
                None => PromptBuilder::category_prompt(&self.config.brand, category),
            };

            let text = match self.content.generate_text(prompt).await {
                Ok(generated) => PromptBuilder::clean_generated_text(&generated.text),
                Err(e) => {
                    warn!(%attempt, error = %e, "Content generation failed");
                    continue;
                }
            };

            if text.is_empty() {
                warn!(%attempt, "Content generator returned no usable text");
                continue;
            }

            if history.is_too_similar(&text, lookback, threshold) {
                debug!(%attempt, "Candidate too similar to recent posts, regenerating");
                continue;
            }

            return (text, GenerationOutcome::Generated);
        }

        info!(
            %category,
            "Exhausted {} generation attempts, using fallback post",
            max_attempts
        );
        (
            category.descriptor().fallback_post.to_string(),
            GenerationOutcome::Fallback,
        )
    }

    /// Generates the post image; failure degrades to a text-only post
    async fn generate_image(
        &self,
        category: Category,
        holiday: Option<&ResolvedHoliday>,
    ) -> Option<PathBuf> {
        let (prompt, label) = match holiday {
            Some(holiday) => (
                PromptBuilder::holiday_image_prompt(&holiday.name),
                "holiday".to_string(),
            ),
            None => (
                PromptBuilder::category_image_prompt(category),
                category.to_string(),
            ),
        };

        let request = ImageRequest {
            prompt,
            size: self.config.ai.image_size.clone(),
            quality: self.config.ai.image_quality.clone(),
            style: self.config.ai.image_style.clone(),
            label,
        };

        match self.image.generate_image(request).await {
            Ok(image) => {
                info!(path = %image.path.display(), "Image generated");
                Some(image.path)
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed; posting without an image");
                None
            }
        }
    }
}

/// Assembles the hashtag set for a post
///
/// Category posts carry their category tags topped up from the brand pool;
/// holiday posts carry the holiday tags plus brand tags; fallback posts use
/// brand tags only. Selection is deterministic and skips duplicates.
fn compose_hashtags(
    category: Category,
    holiday: Option<&ResolvedHoliday>,
    outcome: GenerationOutcome,
) -> Vec<String> {
    let mut tags: Vec<String> = match (outcome, holiday) {
        (GenerationOutcome::Fallback, _) => Vec::new(),
        (_, Some(holiday)) => holiday.hashtags.clone(),
        (_, None) => category
            .descriptor()
            .hashtags
            .iter()
            .map(|t| t.to_string())
            .collect(),
    };

    let target = match (outcome, holiday) {
        (GenerationOutcome::Fallback, _) => 6,
        (_, Some(_)) => tags.len() + 4,
        (_, None) => tags.len() + 3,
    };

    for tag in BRAND_HASHTAGS {
        if tags.len() >= target {
            break;
        }
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }

    tags
}
