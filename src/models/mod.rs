//! Data models module
//!
//! This module contains the typed rows of the three salon sheets

pub mod client;
pub mod service;
pub mod appointment;

// Re-export commonly used models
pub use client::{Client, CreateClientRequest};
pub use service::Service;
pub use appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};
