//! Client registration service

use std::sync::Arc;
use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Client, CreateClientRequest};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

#[derive(Clone)]
pub struct ClientService {
    database: DatabaseService,
    clock: Arc<dyn Clock>,
}

impl ClientService {
    pub fn new(database: DatabaseService, clock: Arc<dyn Clock>) -> Self {
        Self { database, clock }
    }

    pub async fn find(&self, user_id: i64) -> Result<Option<Client>> {
        self.database.clients.find_by_user_id(user_id).await
    }

    /// Register a new client, stamped with the current time
    pub async fn register(&self, request: CreateClientRequest) -> Result<Client> {
        let client = self.database.clients.create(request, self.clock.now()).await?;
        info!(user_id = client.user_id, "Client registered");
        log_user_action(client.user_id, "register", Some(&client.client_name));
        Ok(client)
    }
}
