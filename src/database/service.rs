//! Database service layer
//!
//! This module provides a high-level interface to the salon sheets

use std::sync::Arc;
use tracing::info;
use crate::config::{StorageBackend, StorageConfig};
use crate::database::{ClientRepository, ServiceRepository, AppointmentRepository};
use crate::database::memory::InMemoryStore;
use crate::database::sheets::GoogleSheetsStore;
use crate::database::store::RecordStore;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub clients: ClientRepository,
    pub services: ServiceRepository,
    pub appointments: AppointmentRepository,
}

impl DatabaseService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            clients: ClientRepository::new(store.clone()),
            services: ServiceRepository::new(store.clone()),
            appointments: AppointmentRepository::new(store),
        }
    }

    /// Open the record store selected in settings
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let store: Arc<dyn RecordStore> = match config.backend {
            StorageBackend::Sheets => Arc::new(GoogleSheetsStore::from_config(config)?),
            StorageBackend::Memory => {
                info!("Using in-memory record store, data is lost on restart");
                Arc::new(InMemoryStore::new())
            }
        };

        Ok(Self::new(store))
    }
}
