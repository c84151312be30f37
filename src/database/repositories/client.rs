//! Client repository implementation

use std::sync::Arc;
use tracing::warn;
use crate::database::store::{RecordStore, Sheet};
use crate::models::client::{Client, CreateClientRequest};
use crate::utils::errors::BotError;
use crate::utils::helpers::format_timestamp;

#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn RecordStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All parseable client rows
    pub async fn get_all(&self) -> Result<Vec<Client>, BotError> {
        let records = self.store.read_all(Sheet::Clients).await?;
        Ok(records
            .iter()
            .enumerate()
            .filter_map(|(row, record)| match Client::from_record(record) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(sheet = "clients", row = row, error = %e, "Skipping unparseable client row");
                    None
                }
            })
            .collect())
    }

    /// Find client by Telegram user ID
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Client>, BotError> {
        Ok(self.get_all().await?.into_iter().find(|client| client.user_id == user_id))
    }

    /// Append a new client row
    pub async fn create(&self, request: CreateClientRequest, registered_at: chrono::NaiveDateTime) -> Result<Client, BotError> {
        let client = Client {
            user_id: request.user_id,
            client_name: request.client_name,
            phone: request.phone,
            username: request.username.unwrap_or_default(),
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            registered_at: format_timestamp(registered_at),
        };

        self.store.append(Sheet::Clients, client.to_record()).await?;
        Ok(client)
    }

    pub async fn count(&self) -> Result<usize, BotError> {
        Ok(self.get_all().await?.len())
    }
}

impl std::fmt::Debug for ClientRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRepository").finish_non_exhaustive()
    }
}
