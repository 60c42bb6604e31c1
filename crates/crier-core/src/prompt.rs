//! Prompt builder for AI interactions
//!
//! Builds chat prompts for post generation and scene descriptions for image
//! generation, framed by the configured brand profile.

use crate::catalog::{Category, IMAGE_QUALITY_SETTINGS};
use crate::config::BrandProfile;
use crate::holiday::ResolvedHoliday;
use crate::ports::content::ContentPrompt;

/// Builder for constructing generation prompts
pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the chat prompt for an ordinary category post
    pub fn category_prompt(brand: &BrandProfile, category: Category) -> ContentPrompt {
        let system_message = format!(
            "You are an expert social media manager for {}. Generate ONE SINGLE engaging, \
             authentic post that showcases web design expertise while being helpful to the \
             local business community. Keep the post under 200 words and include relevant \
             emojis. IMPORTANT: Generate only ONE post, not multiple numbered posts. Do not \
             use numbers like '1)', '2)', '3)' in your response.",
            brand.name
        );

        let user_message = format!(
            "{}\n\nGenerate a {} post that is engaging, authentic, and relevant to local \
             businesses.\n\n{}",
            Self::brand_context(brand),
            category.to_string().replace('_', " "),
            category.descriptor().description
        );

        ContentPrompt {
            system_message,
            user_message,
        }
    }

    /// Builds the chat prompt for a holiday-themed post
    pub fn holiday_prompt(brand: &BrandProfile, holiday: &ResolvedHoliday) -> ContentPrompt {
        let system_message = format!(
            "You are an expert social media manager for {}. Today is {}. Generate ONE SINGLE \
             engaging, authentic holiday post that {} {} while being relevant to web design \
             and local businesses. Keep the post under 200 words and include relevant emojis. \
             IMPORTANT: Generate only ONE post, not multiple numbered posts. Do not use \
             numbers like '1)', '2)', '3)' in your response.",
            brand.name,
            holiday.name,
            holiday.tone.verb(),
            holiday.name
        );

        let user_message = format!(
            "{}\n\nToday is {}. Generate a holiday-themed post that honors the significance \
             of this national holiday while connecting it to web design and local business \
             success.",
            Self::brand_context(brand),
            holiday.name
        );

        ContentPrompt {
            system_message,
            user_message,
        }
    }

    /// Builds the image prompt for an ordinary category post
    pub fn category_image_prompt(category: Category) -> String {
        format!(
            "{} {}. Perfect for social media.",
            category.descriptor().image_prompt,
            IMAGE_QUALITY_SETTINGS
        )
    }

    /// Builds the image prompt for a holiday post
    ///
    /// Well-known holidays get a tailored scene; everything else falls back
    /// to a generic celebration composition.
    pub fn holiday_image_prompt(holiday_name: &str) -> String {
        let lower = holiday_name.to_lowercase();

        if lower.contains("independence") || lower.contains("july") {
            format!(
                "Professional photograph of American flag with modern web design elements \
                 subtly integrated. Clean, patriotic composition with red, white, and blue \
                 color scheme. {}. Perfect for social media.",
                IMAGE_QUALITY_SETTINGS
            )
        } else if lower.contains("christmas") {
            format!(
                "Professional photograph of festive holiday decorations with modern web \
                 design elements subtly integrated. Clean, warm composition with holiday \
                 colors. {}. Perfect for social media.",
                IMAGE_QUALITY_SETTINGS
            )
        } else if lower.contains("thanksgiving") {
            format!(
                "Professional photograph of warm, welcoming Thanksgiving elements with \
                 modern web design concepts subtly integrated. Clean, cozy composition with \
                 autumn colors. {}. Perfect for social media.",
                IMAGE_QUALITY_SETTINGS
            )
        } else {
            format!(
                "Professional photograph of celebration elements with modern web design \
                 concepts subtly integrated. Clean, festive composition. {}. Perfect for \
                 social media.",
                IMAGE_QUALITY_SETTINGS
            )
        }
    }

    /// Strips numbered-list lines from generated text
    ///
    /// Models occasionally return several numbered post variants despite the
    /// system instruction. Lines starting with a digit followed by ')' or '.'
    /// are dropped so only prose remains.
    pub fn clean_generated_text(text: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|line| {
                let mut chars = line.chars();
                match (chars.next(), chars.next()) {
                    (Some(first), Some(second)) => {
                        !(first.is_ascii_digit() && (second == ')' || second == '.'))
                    }
                    _ => true,
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    fn brand_context(brand: &BrandProfile) -> String {
        format!(
            "Company: {}\nLocation: {}\nServices: {}\nTarget Audience: {}\nBrand Voice: {}\n\n{}",
            brand.name,
            brand.location,
            brand.services.join(", "),
            brand.target_audience.join(", "),
            brand.voice,
            brand.content_guidelines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::GreetingTone;
    use chrono::NaiveDate;

    fn test_holiday(name: &str, tone: GreetingTone) -> ResolvedHoliday {
        ResolvedHoliday {
            date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
            name: name.to_string(),
            tone,
            hashtags: vec!["#Christmas".to_string()],
        }
    }

    // === Category Prompt Tests ===

    #[test]
    fn test_category_prompt_includes_brand_and_descriptor() {
        let brand = BrandProfile::default();
        let prompt = PromptBuilder::category_prompt(&brand, Category::SeoTips);

        assert!(prompt.system_message.contains("Fishtown Web Design"));
        assert!(prompt.system_message.contains("ONE SINGLE"));
        assert!(prompt.user_message.contains("seo tips"));
        assert!(prompt.user_message.contains(&brand.location));
        assert!(prompt
            .user_message
            .contains(Category::SeoTips.descriptor().description));
    }

    #[test]
    fn test_category_prompt_carries_content_guidelines() {
        let brand = BrandProfile::default();
        let prompt = PromptBuilder::category_prompt(&brand, Category::BehindTheScenes);
        assert!(prompt.user_message.contains("fully remote"));
    }

    // === Holiday Prompt Tests ===

    #[test]
    fn test_holiday_prompt_names_the_holiday() {
        let brand = BrandProfile::default();
        let holiday = test_holiday("Christmas", GreetingTone::Celebratory);
        let prompt = PromptBuilder::holiday_prompt(&brand, &holiday);

        assert!(prompt.system_message.contains("Christmas"));
        assert!(prompt.user_message.contains("Today is Christmas"));
    }

    #[test]
    fn test_holiday_prompt_respects_tone() {
        let brand = BrandProfile::default();

        let celebratory = test_holiday("Christmas", GreetingTone::Celebratory);
        let prompt = PromptBuilder::holiday_prompt(&brand, &celebratory);
        assert!(prompt.system_message.contains("celebrates"));

        let commemorative = test_holiday("Memorial Day", GreetingTone::Commemorative);
        let prompt = PromptBuilder::holiday_prompt(&brand, &commemorative);
        assert!(prompt.system_message.contains("honors"));
    }

    // === Image Prompt Tests ===

    #[test]
    fn test_category_image_prompt_includes_quality_settings() {
        let prompt = PromptBuilder::category_image_prompt(Category::MobileDesign);
        assert!(prompt.contains(Category::MobileDesign.descriptor().image_prompt));
        assert!(prompt.contains("no text"));
        assert!(prompt.ends_with("Perfect for social media."));
    }

    #[test]
    fn test_holiday_image_prompt_variants() {
        let christmas = PromptBuilder::holiday_image_prompt("Christmas");
        assert!(christmas.contains("festive holiday decorations"));

        let thanksgiving = PromptBuilder::holiday_image_prompt("Thanksgiving");
        assert!(thanksgiving.contains("autumn colors"));

        let fourth = PromptBuilder::holiday_image_prompt("Independence Day");
        assert!(fourth.contains("patriotic"));

        let generic = PromptBuilder::holiday_image_prompt("Labor Day");
        assert!(generic.contains("celebration elements"));
    }

    // === Cleanup Tests ===

    #[test]
    fn test_clean_generated_text_strips_numbered_lines() {
        let raw = "Here are some posts:\n1) First variant post\n2. Second variant post\nKeep this line";
        let cleaned = PromptBuilder::clean_generated_text(raw);

        assert!(!cleaned.contains("First variant"));
        assert!(!cleaned.contains("Second variant"));
        assert!(cleaned.contains("Keep this line"));
    }

    #[test]
    fn test_clean_generated_text_preserves_plain_post() {
        let raw = "  Great websites load fast! 🚀\n\nSpeed matters.  ";
        let cleaned = PromptBuilder::clean_generated_text(raw);
        assert!(cleaned.starts_with("Great websites"));
        assert!(cleaned.ends_with("Speed matters."));
    }

    #[test]
    fn test_clean_generated_text_keeps_numbers_inside_lines() {
        let raw = "Over 50% of traffic is mobile. 3 seconds is the limit.";
        let cleaned = PromptBuilder::clean_generated_text(raw);
        assert_eq!(cleaned, raw);
    }

    #[test]
    fn test_clean_generated_text_single_character_line() {
        let cleaned = PromptBuilder::clean_generated_text("7");
        assert_eq!(cleaned, "7");
    }
}
