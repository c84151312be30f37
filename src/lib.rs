//! NailBuddy Telegram Bot
//!
//! Appointment booking for a small nail salon: client registration, booking
//! through a month calendar, cancellation, a read-only master menu and daily
//! reminders, backed by a Google Spreadsheet.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod messenger;
pub mod models;
pub mod services;
pub mod state;
pub mod texts;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BotError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::{AppContext, ScenarioManager, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
