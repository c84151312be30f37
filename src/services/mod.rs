//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod booking;
pub mod calendar;
pub mod client;
pub mod notification;
pub mod reminder;
pub mod schedule;
pub mod slots;

// Re-export commonly used services
pub use auth::AuthService;
pub use booking::{BookingService, BookingOutcome};
pub use calendar::{CalendarMonth, CalendarCell};
pub use client::ClientService;
pub use notification::NotificationService;
pub use reminder::{ReminderService, ReminderScheduler, ReminderReport};
pub use schedule::{ScheduleService, SalonStatistics};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::messenger::Messenger;
use crate::utils::clock::Clock;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub booking_service: BookingService,
    pub schedule_service: ScheduleService,
    pub notification_service: NotificationService,
    pub reminder_service: ReminderService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        database: DatabaseService,
        messenger: Arc<dyn Messenger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notification_service = NotificationService::new(messenger, settings.bot.master_chat_id);

        Self {
            auth_service: AuthService::new(settings.bot.master_user_id),
            client_service: ClientService::new(database.clone(), clock.clone()),
            booking_service: BookingService::new(database.clone(), &settings.schedule, clock.clone()),
            schedule_service: ScheduleService::new(database.clone(), clock),
            reminder_service: ReminderService::new(database, notification_service.clone()),
            notification_service,
        }
    }
}
