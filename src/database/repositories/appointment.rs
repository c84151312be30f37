//! Appointment repository implementation

use std::sync::Arc;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};
use crate::database::store::{RecordStore, Sheet};
use crate::models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};
use crate::utils::errors::BotError;
use crate::utils::helpers::{format_timestamp, generate_uuid};

#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn RecordStore>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All parseable appointments paired with their data row index
    async fn rows(&self) -> Result<Vec<(usize, Appointment)>, BotError> {
        let records = self.store.read_all(Sheet::Appointments).await?;
        Ok(records
            .iter()
            .enumerate()
            .filter_map(|(row, record)| match Appointment::from_record(record) {
                Ok(appointment) => Some((row, appointment)),
                Err(e) => {
                    warn!(sheet = "appointments", row = row, error = %e, "Skipping unparseable appointment row");
                    None
                }
            })
            .collect())
    }

    pub async fn get_all(&self) -> Result<Vec<Appointment>, BotError> {
        Ok(self.rows().await?.into_iter().map(|(_, appointment)| appointment).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, BotError> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|appointment| appointment.id.as_deref() == Some(id)))
    }

    /// Confirmed appointments on a date, sorted by time
    pub async fn get_confirmed_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, BotError> {
        let mut appointments: Vec<Appointment> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.is_confirmed() && a.date == date)
            .collect();
        appointments.sort_by_key(|a| a.time);
        Ok(appointments)
    }

    /// Confirmed appointments owned by a client, soonest first
    pub async fn get_confirmed_for_client(&self, user_id: i64) -> Result<Vec<Appointment>, BotError> {
        let mut appointments: Vec<Appointment> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|a| a.is_confirmed() && a.is_owned_by(user_id))
            .collect();
        appointments.sort_by_key(Appointment::starts_at);
        Ok(appointments)
    }

    /// Append a confirmed appointment with a fresh identifier
    pub async fn create(&self, request: CreateAppointmentRequest, created_at: NaiveDateTime) -> Result<Appointment, BotError> {
        let appointment = Appointment {
            id: Some(generate_uuid()),
            client_user_id: request.client_user_id,
            client_name: request.client_name,
            phone: request.phone,
            service_name: request.service_name,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Confirmed,
            created_at: format_timestamp(created_at),
            master_note: String::new(),
        };

        self.store.append(Sheet::Appointments, appointment.to_record()).await?;
        info!(
            appointment_id = appointment.id.as_deref().unwrap_or_default(),
            user_id = appointment.client_user_id,
            date = %appointment.date,
            time = %appointment.time,
            "Appointment created"
        );
        Ok(appointment)
    }

    /// Mark an appointment cancelled and return it as re-read from the store
    pub async fn cancel(&self, id: &str) -> Result<Appointment, BotError> {
        let row = self
            .rows()
            .await?
            .into_iter()
            .find(|(_, appointment)| appointment.id.as_deref() == Some(id))
            .map(|(row, _)| row)
            .ok_or_else(|| BotError::AppointmentNotFound { id: id.to_string() })?;

        self.store
            .update_cell(Sheet::Appointments, row, "status", AppointmentStatus::Cancelled.as_str())
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| BotError::AppointmentNotFound { id: id.to_string() })
    }
}

impl std::fmt::Debug for AppointmentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentRepository").finish_non_exhaustive()
    }
}
