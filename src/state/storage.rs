//! State storage implementation
//!
//! Conversation contexts are kept in process memory, keyed by user id, with a
//! time-to-live after which a context is treated as absent and eventually
//! swept by [`StateStorageManager`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::config::ConversationConfig;
use super::context::ConversationContext;

/// In-memory conversation state storage
#[derive(Debug)]
pub struct StateStorage {
    contexts: RwLock<HashMap<i64, ConversationContext>>,
    default_ttl: chrono::Duration,
}

impl StateStorage {
    /// Create a new state storage instance
    pub fn new(config: &ConversationConfig) -> Self {
        Self::with_ttl(chrono::Duration::seconds(config.ttl_seconds as i64))
    }

    pub fn with_ttl(default_ttl: chrono::Duration) -> Self {
        Self {
            contexts: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Save conversation context, applying the default TTL when none is set
    pub async fn save_context(&self, context: &ConversationContext) {
        let mut context = context.clone();
        context.ensure_expiry(self.default_ttl);

        debug!(user_id = context.user_id, scenario = ?context.scenario, step = ?context.step,
               expires_at = ?context.expires_at, "Saving conversation context");

        self.contexts.write().await.insert(context.user_id, context);
    }

    /// Load conversation context; expired contexts are removed and reported as absent
    pub async fn load_context(&self, user_id: i64) -> Option<ConversationContext> {
        let context = self.contexts.read().await.get(&user_id).cloned()?;

        if context.is_expired() {
            warn!(user_id = user_id, expires_at = ?context.expires_at, "Context has expired, removing");
            self.delete_context(user_id).await;
            return None;
        }

        debug!(user_id = user_id, scenario = ?context.scenario, step = ?context.step, "Context loaded");
        Some(context)
    }

    /// Delete conversation context
    pub async fn delete_context(&self, user_id: i64) {
        if self.contexts.write().await.remove(&user_id).is_some() {
            debug!("Deleted context for user {}", user_id);
        } else {
            debug!("No context to delete for user {}", user_id);
        }
    }

    /// Check if a live context exists for a user
    pub async fn context_exists(&self, user_id: i64) -> bool {
        self.contexts
            .read()
            .await
            .get(&user_id)
            .map_or(false, |context| !context.is_expired())
    }

    /// Clean up expired contexts
    pub async fn cleanup_expired_contexts(&self) -> u32 {
        let mut contexts = self.contexts.write().await;
        let before = contexts.len();
        contexts.retain(|_, context| !context.is_expired());
        let cleaned_count = (before - contexts.len()) as u32;

        if cleaned_count > 0 {
            info!("Cleaned up {} expired contexts", cleaned_count);
        }

        cleaned_count
    }

    /// Get storage statistics
    pub async fn get_stats(&self) -> StorageStats {
        let contexts = self.contexts.read().await;
        let total_contexts = contexts.len();

        let mut expired_contexts = 0;
        let mut scenarios_count = HashMap::new();

        for context in contexts.values() {
            if context.is_expired() {
                expired_contexts += 1;
            } else if let Some(scenario) = &context.scenario {
                *scenarios_count.entry(scenario.clone()).or_insert(0) += 1;
            }
        }

        StorageStats {
            total_contexts,
            expired_contexts,
            active_contexts: total_contexts - expired_contexts,
            scenarios_count,
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageStats {
    pub total_contexts: usize,
    pub active_contexts: usize,
    pub expired_contexts: usize,
    pub scenarios_count: HashMap<String, u32>,
}

/// State storage manager with automatic cleanup
#[derive(Debug)]
pub struct StateStorageManager {
    storage: Arc<StateStorage>,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl StateStorageManager {
    /// Create a new state storage manager around shared storage
    pub fn new(storage: Arc<StateStorage>, cleanup_interval: Duration) -> Self {
        Self {
            storage,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let storage = self.storage.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;

                let count = storage.cleanup_expired_contexts().await;
                if count > 0 {
                    info!("Cleanup task removed {} expired contexts", count);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop automatic cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    /// Get reference to the storage
    pub fn storage(&self) -> &Arc<StateStorage> {
        &self.storage
    }
}

impl Drop for StateStorageManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
