//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the NailBuddy application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must be kept alive for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let file_appender = tracing_appender::rolling::daily(directory, "nailbuddy.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log master (operator) actions
pub fn log_master_action(master_id: i64, action: &str) {
    info!(
        master_id = master_id,
        action = action,
        "Master action performed"
    );
}

/// Log record store operations
pub fn log_store_operation(operation: &str, sheet: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            sheet = sheet,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            sheet = sheet,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}

/// Log a best-effort notification outcome
pub fn log_notification(chat_id: i64, kind: &str, error: Option<&str>) {
    match error {
        None => debug!(chat_id = chat_id, kind = kind, "Notification delivered"),
        Some(error) => warn!(chat_id = chat_id, kind = kind, error = error, "Notification not delivered"),
    }
}
