//! Conversation context management
//!
//! This module handles user conversation context, tracking current scenarios,
//! steps, and associated data for each user's interaction with the bot.

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::messenger::Messenger;
use crate::services::ServiceFactory;
use crate::state::scenarios::ScenarioManager;
use crate::state::storage::StateStorage;
use crate::utils::clock::Clock;
use crate::utils::errors::{BotError, Result};

/// Application-wide context containing services and settings
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub scenario_manager: Arc<ScenarioManager>,
    pub state_storage: Arc<StateStorage>,
    pub messenger: Arc<dyn Messenger>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Wire services, scenarios and conversation storage together
    pub fn new(
        settings: Settings,
        database: DatabaseService,
        messenger: Arc<dyn Messenger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let services = Arc::new(ServiceFactory::new(&settings, database, messenger.clone(), clock.clone()));
        let state_storage = Arc::new(StateStorage::new(&settings.conversation));

        Self {
            settings,
            services,
            scenario_manager: Arc::new(ScenarioManager::new()),
            state_storage,
            messenger,
            clock,
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("state_storage", &self.state_storage)
            .finish_non_exhaustive()
    }
}

/// User conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// User ID this context belongs to
    pub user_id: i64,
    /// Current scenario the user is in
    pub scenario: Option<String>,
    /// Current step within the scenario
    pub step: Option<String>,
    /// Scenario-specific data
    pub data: HashMap<String, serde_json::Value>,
    /// When this context expires (for cleanup)
    pub expires_at: Option<DateTime<Utc>>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a new conversation context for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            scenario: None,
            step: None,
            data: HashMap::new(),
            expires_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Start a new scenario, dropping data collected by any earlier one
    pub fn start_scenario(&mut self, scenario: &str, initial_step: &str) {
        self.scenario = Some(scenario.to_string());
        self.step = Some(initial_step.to_string());
        self.data.clear();
        self.expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Move to the next step in the current scenario
    pub fn next_step(&mut self, step: &str) -> Result<()> {
        if self.scenario.is_none() {
            return Err(BotError::InvalidStateTransition {
                from: "no_scenario".to_string(),
                to: step.to_string(),
            });
        }

        self.step = Some(step.to_string());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Set data for the current context
    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Get data from the current context
    pub fn get_data<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        match self.data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Get string data (convenience method)
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_data::<String>(key).unwrap_or(None)
    }

    /// Get integer data (convenience method)
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_data::<i64>(key).unwrap_or(None)
    }

    /// Remove data from context
    pub fn remove_data(&mut self, key: &str) -> Option<serde_json::Value> {
        self.updated_at = Utc::now();
        self.data.remove(key)
    }

    /// Check if context has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at.map_or(false, |expires_at| Utc::now() > expires_at)
    }

    /// Set custom expiry time
    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Apply a time-to-live unless the scenario already set its own expiry
    pub fn ensure_expiry(&mut self, ttl: Duration) {
        if self.expires_at.is_none() {
            self.expires_at = Some(Utc::now() + ttl);
        }
    }

    /// Check if user is in a specific scenario
    pub fn is_in_scenario(&self, scenario: &str) -> bool {
        self.scenario.as_deref() == Some(scenario)
    }

    /// Check if user is at a specific step
    pub fn is_at_step(&self, step: &str) -> bool {
        self.step.as_deref() == Some(step)
    }

    /// Check if user is in a specific scenario and step
    pub fn is_at(&self, scenario: &str, step: &str) -> bool {
        self.is_in_scenario(scenario) && self.is_at_step(step)
    }

    /// Get current scenario and step as tuple
    pub fn current_state(&self) -> (Option<&str>, Option<&str>) {
        (self.scenario.as_deref(), self.step.as_deref())
    }

    /// Create a summary of the context for logging
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            user_id: self.user_id,
            scenario: self.scenario.clone(),
            step: self.step.clone(),
            data_keys: self.data.keys().cloned().collect(),
            expires_at: self.expires_at,
        }
    }
}

/// Context summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub user_id: i64,
    pub scenario: Option<String>,
    pub step: Option<String>,
    pub data_keys: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
