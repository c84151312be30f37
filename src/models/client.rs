//! Client model

use serde::{Deserialize, Serialize};
use crate::database::store::{field, Record};
use crate::utils::errors::StoreError;

/// A registered salon client, one row of the `clients` sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub user_id: i64,
    pub client_name: String,
    pub phone: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub registered_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub user_id: i64,
    pub client_name: String,
    pub phone: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Client {
    pub fn from_record(record: &Record) -> Result<Self, StoreError> {
        let raw_id = field(record, "user_id");
        let user_id = raw_id.trim().parse::<i64>().map_err(|_| {
            StoreError::InvalidRecord(format!("client user_id '{}' is not a number", raw_id))
        })?;

        Ok(Self {
            user_id,
            client_name: field(record, "client_name").to_string(),
            phone: field(record, "phone").to_string(),
            username: field(record, "username").to_string(),
            first_name: field(record, "first_name").to_string(),
            last_name: field(record, "last_name").to_string(),
            registered_at: field(record, "registered_at").to_string(),
        })
    }

    pub fn to_record(&self) -> Record {
        Record::from([
            ("user_id".to_string(), self.user_id.to_string()),
            ("client_name".to_string(), self.client_name.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("username".to_string(), self.username.clone()),
            ("first_name".to_string(), self.first_name.clone()),
            ("last_name".to_string(), self.last_name.clone()),
            ("registered_at".to_string(), self.registered_at.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_empty() {
        let record = Record::from([
            ("user_id".to_string(), "42".to_string()),
            ("client_name".to_string(), "Anna".to_string()),
        ]);

        let client = Client::from_record(&record).unwrap();
        assert_eq!(client.user_id, 42);
        assert_eq!(client.client_name, "Anna");
        assert_eq!(client.phone, "");
        assert_eq!(client.username, "");
    }

    #[test]
    fn test_non_numeric_user_id_is_rejected() {
        let record = Record::from([("user_id".to_string(), "anna".to_string())]);
        assert!(matches!(Client::from_record(&record), Err(StoreError::InvalidRecord(_))));
    }
}
