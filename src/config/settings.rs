//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub conversation: ConversationConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    /// Chat that receives booking, cancellation and daily summary notices
    pub master_chat_id: Option<i64>,
    /// The only user allowed into the master menu
    pub master_user_id: Option<i64>,
}

/// Which record store implementation backs the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sheets,
    Memory,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub spreadsheet_id: String,
    /// Service account key as inline JSON
    pub credentials_json: Option<String>,
    /// Path to a service account key file
    pub credentials_path: Option<String>,
    pub api_url: String,
    pub token_url: String,
    pub timeout_seconds: u64,
}

/// Business hours and scheduling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub work_start: String,
    pub work_end: String,
    pub slot_duration_minutes: u32,
    pub reminder_time: String,
    /// Fixed UTC offset for "today" and the reminder; server local time when unset
    pub utc_offset_minutes: Option<i32>,
}

/// Conversation scratchpad configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("NAILBUDDY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("bot.token", plain_env("BOT_TOKEN"))?
            .set_override_option("storage.spreadsheet_id", plain_env("SPREADSHEET_ID"))?
            .set_override_option("storage.credentials_json", plain_env("GOOGLE_CREDENTIALS"))?
            .set_override_option("bot.master_chat_id", plain_env_i64("MASTER_CHAT_ID"))?
            .set_override_option("bot.master_user_id", plain_env_i64("MASTER_USER_ID"))?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BotError> {
        super::validation::validate_settings(self)
    }
}

impl ScheduleConfig {
    /// Opening time of the salon
    pub fn opening_time(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.work_start)
    }

    /// Closing time of the salon, the last slot may start exactly at it
    pub fn closing_time(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.work_end)
    }

    pub fn reminder_at(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.reminder_time)
    }

    pub fn slot_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.slot_duration_minutes as i64)
    }
}

fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Read one of the plain variable names used by earlier deployments
fn plain_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn plain_env_i64(name: &str) -> Option<i64> {
    plain_env(name).and_then(|value| value.trim().parse().ok())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sheets,
            spreadsheet_id: String::new(),
            credentials_json: None,
            credentials_path: None,
            api_url: "https://sheets.googleapis.com/v4".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_start: "09:00".to_string(),
            work_end: "21:00".to_string(),
            slot_duration_minutes: 60,
            reminder_time: "19:00".to_string(),
            utc_offset_minutes: None,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            cleanup_interval_seconds: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}
