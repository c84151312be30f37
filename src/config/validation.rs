//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{BotError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_storage_config(&settings.storage)?;
    validate_schedule_config(&settings.schedule)?;
    validate_conversation_config(&settings.conversation)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(BotError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate record store configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.backend == StorageBackend::Memory {
        return Ok(());
    }

    if config.spreadsheet_id.trim().is_empty() {
        return Err(BotError::Config(
            "Spreadsheet ID is required".to_string()
        ));
    }

    if config.credentials_json.is_none() && config.credentials_path.is_none() {
        return Err(BotError::Config(
            "Google service account credentials are required (credentials_json or credentials_path)".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(BotError::Config(
            "Storage timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate business hours
fn validate_schedule_config(config: &super::ScheduleConfig) -> Result<()> {
    let opening = config.opening_time().ok_or_else(|| {
        BotError::Config(format!("Invalid work_start '{}', expected HH:MM", config.work_start))
    })?;
    let closing = config.closing_time().ok_or_else(|| {
        BotError::Config(format!("Invalid work_end '{}', expected HH:MM", config.work_end))
    })?;

    if opening > closing {
        return Err(BotError::Config(
            "work_start must not be later than work_end".to_string()
        ));
    }

    if config.slot_duration_minutes == 0 {
        return Err(BotError::Config(
            "Slot duration must be greater than 0".to_string()
        ));
    }

    if config.reminder_at().is_none() {
        return Err(BotError::Config(
            format!("Invalid reminder_time '{}', expected HH:MM", config.reminder_time)
        ));
    }

    if let Some(offset) = config.utc_offset_minutes {
        if offset.abs() >= 24 * 60 {
            return Err(BotError::Config(
                format!("UTC offset {} minutes is out of range", offset)
            ));
        }
    }

    Ok(())
}

fn validate_conversation_config(config: &super::ConversationConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(BotError::Config(
            "Conversation TTL must be greater than 0".to_string()
        ));
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(BotError::Config(
            "Conversation cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
