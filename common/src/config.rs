// Configuration management with layered configuration (file, env)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub content: ContentConfig,
    pub mastodon: MastodonConfig,
    pub text: TextConfig,
    pub schedule: ScheduleConfig,
    pub observability: ObservabilityConfig,
}

/// Location of the pre-authored content items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding `<id>.jpg` / `<id>.yaml` pairs
    pub dir: String,
    /// Id of the item posted on every run
    pub item_id: String,
}

/// Connection settings for the Mastodon instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    pub instance_url: String,
    pub access_token: String,
    /// Media uploads can take a while on slow instances
    pub read_timeout_seconds: u64,
}

/// Phrase pools used to vary the generated status text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    pub greetings: Vec<String>,
    pub announcements: Vec<String>,
    pub salutation: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression with second precision, evaluated in UTC
    pub cron: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment-specific configuration
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    ///
    /// Empty phrase pools are rejected here so that random selection during
    /// composition can never hit an empty list at runtime.
    pub fn validate(&self) -> Result<(), String> {
        // Validate content config
        if self.content.dir.is_empty() {
            return Err("Content dir cannot be empty".to_string());
        }
        if self.content.item_id.is_empty() {
            return Err("Content item_id cannot be empty".to_string());
        }

        // Validate mastodon config
        if self.mastodon.instance_url.is_empty() {
            return Err("Mastodon instance_url cannot be empty".to_string());
        }
        if self.mastodon.access_token.is_empty() {
            return Err("Mastodon access_token cannot be empty".to_string());
        }
        if self.mastodon.read_timeout_seconds == 0 {
            return Err("Mastodon read_timeout_seconds must be greater than 0".to_string());
        }

        // Validate text config
        if self.text.greetings.is_empty() {
            return Err("Text greetings cannot be empty".to_string());
        }
        if self.text.announcements.is_empty() {
            return Err("Text announcements cannot be empty".to_string());
        }
        if self.text.salutation.is_empty() {
            return Err("Text salutation cannot be empty".to_string());
        }
        if self.text.tags.is_empty() {
            return Err("Text tags cannot be empty".to_string());
        }
        if self.text.greetings.iter().any(|g| g.is_empty()) {
            return Err("Text greetings cannot contain empty entries".to_string());
        }
        if self.text.announcements.iter().any(|a| a.is_empty()) {
            return Err("Text announcements cannot contain empty entries".to_string());
        }
        if self.text.tags.iter().any(|t| t.is_empty()) {
            return Err("Text tags cannot contain empty entries".to_string());
        }

        // Validate schedule config
        if let Err(e) = cron::Schedule::from_str(&self.schedule.cron) {
            return Err(format!(
                "Invalid schedule cron expression '{}': {}",
                self.schedule.cron, e
            ));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content: ContentConfig {
                dir: "sloths".to_string(),
                item_id: "00001".to_string(),
            },
            mastodon: MastodonConfig {
                instance_url: "https://mastodon.social".to_string(),
                access_token: "change-me-in-production".to_string(),
                read_timeout_seconds: 240,
            },
            text: TextConfig {
                greetings: vec![
                    "Hello friends of sloths!".to_string(),
                    "Good day, fediverse!".to_string(),
                ],
                announcements: vec![
                    "It is time for a new sloth picture.".to_string(),
                    "Here comes your hourly sloth.".to_string(),
                ],
                salutation: "Have a relaxed day!".to_string(),
                tags: vec!["sloth".to_string(), "AnimalsOfMastodon".to_string()],
            },
            schedule: ScheduleConfig {
                // Top of every hour
                cron: "0 0 * * * *".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}
