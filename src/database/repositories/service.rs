//! Service catalogue repository

use std::sync::Arc;
use tracing::{debug, warn};
use crate::database::store::{RecordStore, Sheet};
use crate::models::service::Service;
use crate::utils::errors::BotError;

#[derive(Clone)]
pub struct ServiceRepository {
    store: Arc<dyn RecordStore>,
}

impl ServiceRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Services from the sheet, or the built-in list when the sheet is empty
    pub async fn get_all(&self) -> Result<Vec<Service>, BotError> {
        let records = self.store.read_all(Sheet::Services).await?;
        let services: Vec<Service> = records
            .iter()
            .filter_map(|record| match Service::from_record(record) {
                Ok(service) => Some(service),
                Err(e) => {
                    warn!(sheet = "services", error = %e, "Skipping unparseable service row");
                    None
                }
            })
            .collect();

        if services.is_empty() {
            debug!("Services sheet is empty, using fallback list");
            return Ok(Service::fallback());
        }

        Ok(services)
    }
}

impl std::fmt::Debug for ServiceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRepository").finish_non_exhaustive()
    }
}
