//! Test data fixtures
//!
//! Rows shaped the way they come back from the spreadsheet.

use chrono::{NaiveDate, NaiveDateTime};
use NailBuddy::database::{InMemoryStore, Record, Sheet};

pub const CLIENT_ID: i64 = 1001;
pub const OTHER_CLIENT_ID: i64 = 1002;
pub const MASTER_ID: i64 = 42;
pub const MASTER_CHAT_ID: i64 = -100500;

pub const CLIENT_NAME: &str = "Anna";
pub const CLIENT_PHONE: &str = "+79991234567";

/// Friday 16 October 2026, 10:30
pub fn test_now() -> NaiveDateTime {
    date(16).and_hms_opt(10, 30, 0).unwrap()
}

/// A day of October 2026
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

pub fn record(fields: &[(&str, &str)]) -> Record {
    fields
        .iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}

pub fn client_record(user_id: i64, name: &str, phone: &str) -> Record {
    record(&[
        ("user_id", &user_id.to_string()),
        ("client_name", name),
        ("phone", phone),
        ("username", ""),
        ("first_name", name),
        ("last_name", ""),
        ("registered_at", "2026-09-01 12:00:00"),
    ])
}

pub fn service_record(name: &str, price: &str) -> Record {
    record(&[("name", name), ("price", price)])
}

pub fn appointment_record(id: &str, user_id: i64, date: NaiveDate, time: &str, status: &str) -> Record {
    record(&[
        ("id", id),
        ("user_id", &user_id.to_string()),
        ("client_name", if user_id == CLIENT_ID { CLIENT_NAME } else { "Olga" }),
        ("phone", if user_id == CLIENT_ID { CLIENT_PHONE } else { "+79990000002" }),
        ("service", "Маникюр"),
        ("date", &date.format("%Y-%m-%d").to_string()),
        ("time", time),
        ("status", status),
        ("created_at", "2026-10-01 09:00:00"),
        ("master_note", ""),
    ])
}

pub fn salon_services() -> Vec<Record> {
    vec![
        service_record("Маникюр", "1500"),
        service_record("Педикюр", "2000"),
        service_record("Покрытие", ""),
    ]
}

/// Store with the registered client and the salon's services
pub fn store_with_client(appointments: Vec<Record>) -> InMemoryStore {
    InMemoryStore::with_records([
        (Sheet::Clients, vec![client_record(CLIENT_ID, CLIENT_NAME, CLIENT_PHONE)]),
        (Sheet::Services, salon_services()),
        (Sheet::Appointments, appointments),
    ])
}
