//! Configuration management for Crier
//!
//! Handles loading and validation of TOML configuration files.

use crate::error::ConfigError;
use crate::holiday::{GreetingTone, HolidayRule, RuleKind};
use crate::ports::publish::Platform;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for Crier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Brand identity woven into every generated prompt
    #[serde(default)]
    pub brand: BrandProfile,

    /// Duplicate-avoidance settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Storage-related settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// AI provider settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Publishing settings
    #[serde(default)]
    pub publishing: PublishingConfig,

    /// Holiday rules, evaluated in list order (first match wins)
    #[serde(default = "default_holidays")]
    pub holidays: Vec<HolidayRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brand: BrandProfile::default(),
            history: HistoryConfig::default(),
            storage: StorageConfig::default(),
            ai: AiConfig::default(),
            publishing: PublishingConfig::default(),
            holidays: default_holidays(),
        }
    }
}

/// Brand profile used to frame generation prompts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandProfile {
    /// Company name
    #[serde(default = "default_brand_name")]
    pub name: String,

    /// Home neighborhood and city
    #[serde(default = "default_brand_location")]
    pub location: String,

    /// Services offered
    #[serde(default = "default_brand_services")]
    pub services: Vec<String>,

    /// Audience the posts speak to
    #[serde(default = "default_brand_audience")]
    pub target_audience: Vec<String>,

    /// Tone of voice for generated copy
    #[serde(default = "default_brand_voice")]
    pub voice: String,

    /// Hard constraints the model must respect
    #[serde(default = "default_brand_guidelines")]
    pub content_guidelines: String,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            name: default_brand_name(),
            location: default_brand_location(),
            services: default_brand_services(),
            target_audience: default_brand_audience(),
            voice: default_brand_voice(),
            content_guidelines: default_brand_guidelines(),
        }
    }
}

/// Duplicate-avoidance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Token-overlap ratio above which a candidate counts as a repeat (default: 0.3)
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// How many recent posts a candidate is compared against (default: 5)
    #[serde(default = "default_lookback_window")]
    pub lookback_window: usize,

    /// Generation attempts before the fallback post is used (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            lookback_window: default_lookback_window(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base data directory (default: ~/.crier/)
    #[serde(
        default = "default_data_dir",
        deserialize_with = "deserialize_data_dir"
    )]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// AI provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// Chat model for post text (default: gpt-4)
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Image model (default: dall-e-3)
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Image dimensions (default: 1024x1024)
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Image quality (default: hd)
    #[serde(default = "default_image_quality")]
    pub image_quality: String,

    /// Image style (default: vivid)
    #[serde(default = "default_image_style")]
    pub image_style: String,

    /// Token cap for generated post text (default: 250)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for post text (default: 0.8)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            image_quality: default_image_quality(),
            image_style: default_image_style(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Publishing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishingConfig {
    /// Platforms to post to, attempted in list order (default: facebook, instagram)
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
        }
    }
}

// Default value functions
fn default_brand_name() -> String {
    "Fishtown Web Design".to_string()
}

fn default_brand_location() -> String {
    "Fishtown, Philadelphia".to_string()
}

fn default_brand_services() -> Vec<String> {
    [
        "Custom Website Design",
        "E-commerce Development",
        "SEO Optimization",
        "Website Maintenance",
        "Mobile-First Design",
        "Brand Identity Design",
        "Digital Marketing",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_brand_audience() -> Vec<String> {
    [
        "Small businesses in Philadelphia",
        "Blue collar businesses, like plumbers, electricians, and HVAC technicians",
        "Professional services",
        "Startups and entrepreneurs",
        "Non-profit organizations",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_brand_voice() -> String {
    "Professional yet approachable, creative, community-focused, tech-savvy but human, philly based"
        .to_string()
}

fn default_brand_guidelines() -> String {
    "IMPORTANT: Do not mention having a local office, physical workspace, or in-person \
     meetings. We are a fully remote company serving the Philadelphia area. Focus on digital \
     services, online collaboration, and virtual support for local businesses."
        .to_string()
}

fn default_similarity_threshold() -> f64 {
    0.3
}

fn default_lookback_window() -> usize {
    5
}

fn default_max_attempts() -> u32 {
    3
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".crier")
}

fn default_text_model() -> String {
    "gpt-4".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "hd".to_string()
}

fn default_image_style() -> String {
    "vivid".to_string()
}

fn default_max_tokens() -> u32 {
    250
}

fn default_temperature() -> f64 {
    0.8
}

fn default_platforms() -> Vec<Platform> {
    vec![Platform::Facebook, Platform::Instagram]
}

/// The major US holidays, in evaluation order
fn default_holidays() -> Vec<HolidayRule> {
    vec![
        HolidayRule {
            name: "New Year's Day".to_string(),
            rule: RuleKind::FixedDate { month: 1, day: 1 },
            hashtags: vec!["#NewYearsDay".to_string(), "#NewYear".to_string()],
            tone: GreetingTone::Celebratory,
        },
        HolidayRule {
            name: "Martin Luther King Jr. Day".to_string(),
            rule: RuleKind::NthWeekday {
                month: 1,
                weekday: Weekday::Mon,
                ordinal: 3,
            },
            hashtags: vec!["#MLKDay".to_string()],
            tone: GreetingTone::Commemorative,
        },
        HolidayRule {
            name: "Presidents' Day".to_string(),
            rule: RuleKind::NthWeekday {
                month: 2,
                weekday: Weekday::Mon,
                ordinal: 3,
            },
            hashtags: vec!["#PresidentsDay".to_string()],
            tone: GreetingTone::Commemorative,
        },
        HolidayRule {
            name: "Memorial Day".to_string(),
            rule: RuleKind::LastWeekday {
                month: 5,
                weekday: Weekday::Mon,
            },
            hashtags: vec!["#MemorialDay".to_string()],
            tone: GreetingTone::Commemorative,
        },
        HolidayRule {
            name: "Labor Day".to_string(),
            rule: RuleKind::NthWeekday {
                month: 9,
                weekday: Weekday::Mon,
                ordinal: 1,
            },
            hashtags: vec!["#LaborDay".to_string()],
            tone: GreetingTone::Celebratory,
        },
        HolidayRule {
            name: "Columbus Day".to_string(),
            rule: RuleKind::NthWeekday {
                month: 10,
                weekday: Weekday::Mon,
                ordinal: 2,
            },
            hashtags: vec!["#ColumbusDay".to_string()],
            tone: GreetingTone::Commemorative,
        },
        HolidayRule {
            name: "Veterans Day".to_string(),
            rule: RuleKind::FixedDate { month: 11, day: 11 },
            hashtags: vec!["#VeteransDay".to_string()],
            tone: GreetingTone::Commemorative,
        },
        HolidayRule {
            name: "Thanksgiving".to_string(),
            rule: RuleKind::NthWeekday {
                month: 11,
                weekday: Weekday::Thu,
                ordinal: 4,
            },
            hashtags: vec!["#Thanksgiving".to_string()],
            tone: GreetingTone::Celebratory,
        },
        HolidayRule {
            name: "Christmas".to_string(),
            rule: RuleKind::FixedDate { month: 12, day: 25 },
            hashtags: vec!["#Christmas".to_string(), "#MerryChristmas".to_string()],
            tone: GreetingTone::Celebratory,
        },
    ]
}

/// Expands tilde (~) in a path to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path_str.strip_prefix("~/").unwrap());
        }
    } else if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    path.to_path_buf()
}

/// Custom deserializer for data_dir that expands tilde
fn deserialize_data_dir<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let path_str = String::deserialize(deserializer)?;
    let path = PathBuf::from(path_str);
    Ok(expand_tilde(&path))
}

impl Config {
    /// Validates the configuration values
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if:
    /// - `history.similarity_threshold` is outside (0.0, 1.0]
    /// - `history.lookback_window` or `history.max_attempts` is 0
    /// - `ai.text_model` or `ai.image_model` is empty
    /// - any holiday rule carries an out-of-range month, day, or ordinal
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.similarity_threshold <= 0.0 || self.history.similarity_threshold > 1.0 {
            return Err(ConfigError::InvalidValue(
                "similarity_threshold must be in (0.0, 1.0]".to_string(),
            ));
        }

        if self.history.lookback_window == 0 {
            return Err(ConfigError::InvalidValue(
                "lookback_window must be > 0".to_string(),
            ));
        }

        if self.history.max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "max_attempts must be > 0".to_string(),
            ));
        }

        if self.ai.text_model.is_empty() {
            return Err(ConfigError::InvalidValue(
                "text_model must not be empty".to_string(),
            ));
        }

        if self.ai.image_model.is_empty() {
            return Err(ConfigError::InvalidValue(
                "image_model must not be empty".to_string(),
            ));
        }

        for holiday in &self.holidays {
            holiday.rule.validate().map_err(|e| {
                ConfigError::InvalidValue(format!("holiday '{}': {}", holiday.name, e))
            })?;
        }

        Ok(())
    }
}

/// Returns the default configuration file path (`~/.crier/config.toml`)
pub fn get_default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".crier")
        .join("config.toml")
}

/// Loads configuration from the specified path
///
/// If the file doesn't exist, creates a default configuration file.
/// If the file is invalid or contains invalid values, returns default configuration.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// * `Ok(Config)` - Successfully loaded or default configuration
/// * `Err(ConfigError)` - Only for IO errors during file creation
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Generate default config and write to file
        let default_config = Config::default();
        let toml_str = toml::to_string_pretty(&default_config)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, &toml_str)?;

        tracing::info!("Created default configuration file at {:?}", path);
        return Ok(default_config);
    }

    // Read existing file
    let content = fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = match toml::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(
                "Failed to parse configuration file {:?}: {}. Using default configuration.",
                path,
                e
            );
            return Ok(Config::default());
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::warn!(
            "Invalid configuration in {:?}: {}. Using default configuration.",
            path,
            e
        );
        return Ok(Config::default());
    }

    Ok(config)
}

/// Loads configuration from the default path (`~/.crier/config.toml`)
///
/// Convenience wrapper around `load_config_from_path`.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from_path(&get_default_config_path())
}
