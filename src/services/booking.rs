//! Booking service
//!
//! Service catalogue, slot availability, appointment creation and
//! cancellation on behalf of a client.

use std::collections::HashSet;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};
use super::slots::{available_slots, generate_slots};
use crate::config::ScheduleConfig;
use crate::database::DatabaseService;
use crate::models::{Appointment, CreateAppointmentRequest, Service};
use crate::utils::clock::Clock;
use crate::utils::errors::{BotError, Result};
use crate::utils::logging::log_user_action;

/// Result of trying to book a slot
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(Appointment),
    /// Someone else booked the slot after it was offered
    SlotTaken,
}

#[derive(Clone)]
pub struct BookingService {
    database: DatabaseService,
    slots: Vec<NaiveTime>,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    pub fn new(database: DatabaseService, schedule: &ScheduleConfig, clock: Arc<dyn Clock>) -> Self {
        let slots = match (schedule.opening_time(), schedule.closing_time()) {
            (Some(open), Some(close)) => generate_slots(open, close, schedule.slot_duration()),
            _ => {
                warn!("Business hours are not parseable, no slots will be offered");
                Vec::new()
            }
        };

        Self { database, slots, clock }
    }

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        self.database.services.get_all().await
    }

    async fn booked_times(&self, date: NaiveDate) -> Result<HashSet<NaiveTime>> {
        Ok(self
            .database
            .appointments
            .get_confirmed_on(date)
            .await?
            .into_iter()
            .map(|appointment| appointment.time)
            .collect())
    }

    /// Free slots of a day, excluding booked ones and, for today, past ones
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        let booked = self.booked_times(date).await?;
        Ok(available_slots(&self.slots, &booked, date, self.clock.now()))
    }

    /// Append a confirmed appointment unless the slot was taken meanwhile
    pub async fn create(&self, request: CreateAppointmentRequest) -> Result<BookingOutcome> {
        if !self.available_slots(request.date).await?.contains(&request.time) {
            info!(
                user_id = request.client_user_id,
                date = %request.date,
                time = %request.time,
                "Slot no longer available"
            );
            return Ok(BookingOutcome::SlotTaken);
        }

        let appointment = self.database.appointments.create(request, self.clock.now()).await?;
        log_user_action(appointment.client_user_id, "book", appointment.id.as_deref());
        Ok(BookingOutcome::Created(appointment))
    }

    /// Confirmed appointments of a client, soonest first
    pub async fn active_for_client(&self, user_id: i64) -> Result<Vec<Appointment>> {
        self.database.appointments.get_confirmed_for_client(user_id).await
    }

    /// Cancel one of the client's own confirmed appointments
    pub async fn cancel_for_client(&self, user_id: i64, appointment_id: &str) -> Result<Appointment> {
        let appointment = self
            .database
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| BotError::AppointmentNotFound { id: appointment_id.to_string() })?;

        if !appointment.is_owned_by(user_id) {
            return Err(BotError::PermissionDenied(format!(
                "appointment {} does not belong to user {}",
                appointment_id, user_id
            )));
        }

        if !appointment.is_confirmed() {
            return Err(BotError::AppointmentNotFound { id: appointment_id.to_string() });
        }

        let cancelled = self.database.appointments.cancel(appointment_id).await?;
        log_user_action(user_id, "cancel", Some(appointment_id));
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InMemoryStore, Record, Sheet};
    use crate::utils::clock::FixedClock;
    use assert_matches::assert_matches;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn booked(id: &str, user_id: i64, time: &str) -> Record {
        Record::from([
            ("id".to_string(), id.to_string()),
            ("user_id".to_string(), user_id.to_string()),
            ("service".to_string(), "Маникюр".to_string()),
            ("date".to_string(), "2026-10-20".to_string()),
            ("time".to_string(), time.to_string()),
            ("status".to_string(), "confirmed".to_string()),
        ])
    }

    fn service(records: Vec<Record>) -> BookingService {
        let store = Arc::new(InMemoryStore::with_records([(Sheet::Appointments, records)]));
        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(12, 0, 0).unwrap();
        BookingService::new(DatabaseService::new(store), &ScheduleConfig::default(), Arc::new(FixedClock(now)))
    }

    fn request(user_id: i64, time: NaiveTime) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            client_user_id: user_id,
            client_name: "Anna".to_string(),
            phone: "+79991234567".to_string(),
            service_name: "Маникюр".to_string(),
            date: day(),
            time,
        }
    }

    #[tokio::test]
    async fn test_booked_times_are_excluded() {
        let booking = service(vec![booked("a", 1, "09:00"), booked("b", 2, "15:00")]);
        let slots = booking.available_slots(day()).await.unwrap();
        assert_eq!(slots.len(), 11);
        assert!(!slots.contains(&t(9)));
        assert!(!slots.contains(&t(15)));
    }

    #[tokio::test]
    async fn test_taken_slot_is_rechecked() {
        let booking = service(vec![booked("a", 1, "10:00")]);
        assert_matches!(booking.create(request(2, t(10))).await.unwrap(), BookingOutcome::SlotTaken);
        assert_matches!(booking.create(request(2, t(11))).await.unwrap(), BookingOutcome::Created(_));
    }

    #[tokio::test]
    async fn test_cannot_cancel_foreign_appointment() {
        let booking = service(vec![booked("a", 1, "10:00")]);
        assert_matches!(booking.cancel_for_client(2, "a").await, Err(BotError::PermissionDenied(_)));

        let cancelled = booking.cancel_for_client(1, "a").await.unwrap();
        assert!(!cancelled.is_confirmed());
        assert_matches!(booking.cancel_for_client(1, "a").await, Err(BotError::AppointmentNotFound { .. }));
    }
}
