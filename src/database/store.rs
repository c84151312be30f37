//! Record store abstraction
//!
//! Each sheet is a list of rows mapping column name to string value. Row
//! indices are zero-based over data rows, the header row is not counted.

use std::collections::HashMap;
use std::fmt;
use async_trait::async_trait;
use crate::utils::errors::StoreResult;

pub type Record = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Clients,
    Services,
    Appointments,
}

impl Sheet {
    /// Worksheet title in the spreadsheet
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Clients => "clients",
            Sheet::Services => "services",
            Sheet::Appointments => "appointments",
        }
    }

    /// Header row, in column order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Sheet::Clients => &[
                "user_id", "client_name", "phone", "username", "first_name", "last_name", "registered_at",
            ],
            Sheet::Services => &["name", "price"],
            Sheet::Appointments => &[
                "id", "user_id", "client_name", "phone", "service", "date", "time", "status", "created_at",
                "master_note",
            ],
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tabular backing store
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read_all(&self, sheet: Sheet) -> StoreResult<Vec<Record>>;

    async fn append(&self, sheet: Sheet, record: Record) -> StoreResult<()>;

    /// Overwrite one cell of an existing data row
    async fn update_cell(&self, sheet: Sheet, row: usize, column: &str, value: &str) -> StoreResult<()>;
}

/// Value of a column, empty when the row has no such field
pub fn field<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults_to_empty() {
        let record = Record::from([("name".to_string(), "Маникюр".to_string())]);
        assert_eq!(field(&record, "name"), "Маникюр");
        assert_eq!(field(&record, "price"), "");
    }

    #[test]
    fn test_sheet_columns() {
        assert_eq!(Sheet::Appointments.columns()[0], "id");
        assert!(Sheet::Clients.columns().contains(&"registered_at"));
        assert_eq!(Sheet::Services.to_string(), "services");
    }
}
