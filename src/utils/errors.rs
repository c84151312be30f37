//! Error handling for NailBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for NailBuddy application
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Record store specific errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Row {row} is out of range for sheet '{sheet}'")]
    RowOutOfRange { sheet: String, row: usize },

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for NailBuddy operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Result type alias for record store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl BotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BotError::Store(e) => e.is_recoverable(),
            BotError::Telegram(_) => true,
            BotError::Config(_) => false,
            BotError::PermissionDenied(_) => false,
            BotError::AppointmentNotFound { .. } => false,
            BotError::InvalidStateTransition { .. } => false,
            BotError::Serialization(_) => false,
            BotError::Io(_) => true,
            BotError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BotError::Config(_) => ErrorSeverity::Critical,
            BotError::PermissionDenied(_) => ErrorSeverity::Warning,
            BotError::AppointmentNotFound { .. } => ErrorSeverity::Warning,
            BotError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            BotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl StoreError {
    /// Whether a later attempt of the same call could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Http(_) => true,
            StoreError::Api { status, .. } => *status == 429 || *status >= 500,
            StoreError::Unavailable(_) => true,
            StoreError::Authentication(_)
            | StoreError::RowOutOfRange { .. }
            | StoreError::ColumnNotFound { .. }
            | StoreError::InvalidRecord(_) => false,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
