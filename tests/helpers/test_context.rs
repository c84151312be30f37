//! Test context setup
//!
//! Wires the real handlers and services to an in-memory store, a recording
//! messenger and a frozen clock.

use std::sync::Arc;
use chrono::NaiveDateTime;
use NailBuddy::config::{Settings, StorageBackend};
use NailBuddy::database::{DatabaseService, InMemoryStore, RecordStore};
use NailBuddy::handlers::{dispatch, Command, Inbound, Sender};
use NailBuddy::state::{AppContext, ConversationContext};
use NailBuddy::utils::clock::FixedClock;
use super::recording_messenger::RecordingMessenger;
use super::test_data::{MASTER_CHAT_ID, MASTER_ID};

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = "12345:test_token".to_string();
    settings.bot.master_chat_id = Some(MASTER_CHAT_ID);
    settings.bot.master_user_id = Some(MASTER_ID);
    settings.storage.backend = StorageBackend::Memory;
    settings.schedule.work_start = "09:00".to_string();
    settings.schedule.work_end = "20:00".to_string();
    settings.schedule.slot_duration_minutes = 60;
    settings
}

pub struct TestContext {
    pub app: AppContext,
    pub store: Arc<InMemoryStore>,
    pub messenger: Arc<RecordingMessenger>,
}

impl TestContext {
    pub fn new(store: InMemoryStore, now: NaiveDateTime) -> Self {
        Self::with_settings(store, now, test_settings())
    }

    pub fn with_settings(store: InMemoryStore, now: NaiveDateTime, settings: Settings) -> Self {
        let store = Arc::new(store);
        let messenger = Arc::new(RecordingMessenger::new());
        let database = DatabaseService::new(store.clone() as Arc<dyn RecordStore>);

        let app = AppContext::new(settings, database, messenger.clone(), Arc::new(FixedClock(now)));

        Self { app, store, messenger }
    }

    pub fn sender(&self, user_id: i64) -> Sender {
        Sender {
            user_id,
            chat_id: user_id,
            username: Some("anna_nails".to_string()),
            first_name: Some("Anna".to_string()),
            last_name: None,
        }
    }

    pub async fn command(&self, user_id: i64, command: Command) {
        dispatch(&self.app, &self.sender(user_id), Inbound::Command(command)).await;
    }

    pub async fn text(&self, user_id: i64, text: &str) {
        dispatch(&self.app, &self.sender(user_id), Inbound::Text(text.to_string())).await;
    }

    pub async fn contact(&self, user_id: i64, phone: &str) {
        dispatch(&self.app, &self.sender(user_id), Inbound::Contact { phone: phone.to_string() }).await;
    }

    /// Tap a button on the newest inline keyboard in the user's chat
    pub async fn tap(&self, user_id: i64, data: &str) {
        let message = self.messenger.latest_keyboard(user_id).map(|(target, _)| target);
        dispatch(
            &self.app,
            &self.sender(user_id),
            Inbound::Callback {
                data: data.to_string(),
                message,
            },
        )
        .await;
    }

    /// Callback data currently offered to the user
    pub fn offered(&self, user_id: i64) -> Vec<String> {
        self.messenger
            .latest_keyboard(user_id)
            .map(|(_, message)| message.callback_data().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub async fn conversation(&self, user_id: i64) -> Option<ConversationContext> {
        self.app.state_storage.load_context(user_id).await
    }
}
