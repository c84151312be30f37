//! Database repositories module
//!
//! Typed access to the three sheets on top of a [`RecordStore`](crate::database::store::RecordStore)

pub mod client;
pub mod service;
pub mod appointment;

// Re-export repositories
pub use client::ClientRepository;
pub use service::ServiceRepository;
pub use appointment::AppointmentRepository;
