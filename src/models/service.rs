//! Salon service model

use serde::{Deserialize, Serialize};
use crate::database::store::{field, Record};
use crate::utils::errors::StoreError;

/// Offered when the `services` sheet has no rows
const FALLBACK_SERVICES: [&str; 3] = ["Маникюр", "Педикюр", "Покрытие"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub price: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>, price: Option<String>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn from_record(record: &Record) -> Result<Self, StoreError> {
        let name = field(record, "name").trim();
        if name.is_empty() {
            return Err(StoreError::InvalidRecord("service without a name".to_string()));
        }

        let price = field(record, "price").trim();
        Ok(Self::new(name, (!price.is_empty()).then(|| price.to_string())))
    }

    /// Button label, e.g. "Маникюр - 1500₽"
    pub fn display_label(&self) -> String {
        match &self.price {
            Some(price) => format!("{} - {}₽", self.name, price),
            None => self.name.clone(),
        }
    }

    pub fn fallback() -> Vec<Service> {
        FALLBACK_SERVICES.iter().map(|name| Service::new(*name, None)).collect()
    }
}
