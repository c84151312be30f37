//! Database module
//!
//! This module handles the record store backends and typed repositories

pub mod store;
pub mod sheets;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use store::{Record, RecordStore, Sheet};
pub use sheets::{GoogleSheetsStore, SheetsAuth, ServiceAccountKey};
pub use memory::{InMemoryStore, FailureMode};
pub use repositories::{ClientRepository, ServiceRepository, AppointmentRepository};
pub use service::DatabaseService;
