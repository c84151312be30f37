//! Appointment model

use std::fmt;
use std::str::FromStr;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::database::store::{field, Record};
use crate::utils::errors::StoreError;
use crate::utils::helpers::{format_time, parse_date, parse_time, DATE_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(StoreError::InvalidRecord(format!("unknown appointment status '{}'", other))),
        }
    }
}

/// One row of the `appointments` sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Missing on rows written before appointments carried an identity
    pub id: Option<String>,
    pub client_user_id: i64,
    pub client_name: String,
    pub phone: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub created_at: String,
    pub master_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_user_id: i64,
    pub client_name: String,
    pub phone: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Appointment {
    pub fn from_record(record: &Record) -> Result<Self, StoreError> {
        let raw_user_id = field(record, "user_id");
        let client_user_id = raw_user_id.trim().parse::<i64>().map_err(|_| {
            StoreError::InvalidRecord(format!("appointment user_id '{}' is not a number", raw_user_id))
        })?;

        let raw_date = field(record, "date");
        let date = parse_date(raw_date)
            .ok_or_else(|| StoreError::InvalidRecord(format!("appointment date '{}' is invalid", raw_date)))?;

        let raw_time = field(record, "time");
        let time = parse_time(raw_time)
            .ok_or_else(|| StoreError::InvalidRecord(format!("appointment time '{}' is invalid", raw_time)))?;

        let status = field(record, "status").parse()?;
        let id = field(record, "id").trim();

        Ok(Self {
            id: (!id.is_empty()).then(|| id.to_string()),
            client_user_id,
            client_name: field(record, "client_name").to_string(),
            phone: field(record, "phone").to_string(),
            service_name: field(record, "service").to_string(),
            date,
            time,
            status,
            created_at: field(record, "created_at").to_string(),
            master_note: field(record, "master_note").to_string(),
        })
    }

    pub fn to_record(&self) -> Record {
        Record::from([
            ("id".to_string(), self.id.clone().unwrap_or_default()),
            ("user_id".to_string(), self.client_user_id.to_string()),
            ("client_name".to_string(), self.client_name.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("service".to_string(), self.service_name.clone()),
            ("date".to_string(), self.date.format(DATE_FORMAT).to_string()),
            ("time".to_string(), format_time(self.time)),
            ("status".to_string(), self.status.to_string()),
            ("created_at".to_string(), self.created_at.clone()),
            ("master_note".to_string(), self.master_note.clone()),
        ])
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.client_user_id == user_id
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_full_row() {
        let appointment = Appointment::from_record(&record(&[
            ("id", "a1b2c3d4-0000"),
            ("user_id", "42"),
            ("client_name", "Anna"),
            ("phone", "+79991234567"),
            ("service", "Маникюр"),
            ("date", "2026-10-20"),
            ("time", "14:00"),
            ("status", "confirmed"),
            ("created_at", "2026-10-16 10:00:00"),
        ]))
        .unwrap();

        assert_eq!(appointment.id.as_deref(), Some("a1b2c3d4-0000"));
        assert_eq!(appointment.client_user_id, 42);
        assert_eq!(appointment.service_name, "Маникюр");
        assert!(appointment.is_confirmed());
        assert_eq!(appointment.master_note, "");
        assert_eq!(appointment.to_record()["date"], "2026-10-20");
    }

    #[test]
    fn test_legacy_row_without_id() {
        let appointment = Appointment::from_record(&record(&[
            ("user_id", "42"),
            ("date", "2026-10-20"),
            ("time", "14:00"),
            ("status", "cancelled"),
        ]))
        .unwrap();

        assert!(appointment.id.is_none());
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_unparseable_rows_are_rejected() {
        let bad_date = record(&[("user_id", "1"), ("date", "20.10.2026"), ("time", "14:00"), ("status", "confirmed")]);
        let bad_status = record(&[("user_id", "1"), ("date", "2026-10-20"), ("time", "14:00"), ("status", "pending")]);
        let bad_user = record(&[("user_id", ""), ("date", "2026-10-20"), ("time", "14:00"), ("status", "confirmed")]);

        assert!(Appointment::from_record(&bad_date).is_err());
        assert!(Appointment::from_record(&bad_status).is_err());
        assert!(Appointment::from_record(&bad_user).is_err());
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("Confirmed".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Confirmed);
    }
}
