//! NailBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use anyhow::Context as _;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;
use tracing::{info, warn};

use NailBuddy::{
    config::Settings,
    database::DatabaseService,
    handlers::{telegram, Command},
    messenger::{Messenger, TelegramMessenger},
    services::ReminderScheduler,
    state::{AppContext, StateStorageManager},
    utils::{clock::{Clock, SystemClock}, logging},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", NailBuddy::info());

    let database = DatabaseService::from_config(&settings.storage).context("failed to set up the record store")?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(settings.schedule.utc_offset_minutes));

    let bot = Bot::new(&settings.bot.token);
    let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot.clone()));

    let app = Arc::new(AppContext::new(settings.clone(), database, messenger, clock.clone()));

    // Conversation cleanup
    let mut state_manager = StateStorageManager::new(
        app.state_storage.clone(),
        Duration::from_secs(settings.conversation.cleanup_interval_seconds),
    );
    state_manager.start_cleanup();

    // Daily reminders
    let mut reminder_scheduler = match settings.schedule.reminder_at() {
        Some(run_at) => {
            let mut scheduler = ReminderScheduler::new(app.services.reminder_service.clone(), clock, run_at);
            scheduler.start();
            Some(scheduler)
        }
        None => {
            warn!(reminder_time = %settings.schedule.reminder_time, "Reminder time is not parseable, reminders disabled");
            None
        }
    };

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!("NailBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    if let Some(scheduler) = reminder_scheduler.as_mut() {
        scheduler.stop();
    }
    state_manager.stop_cleanup();

    info!("NailBuddy bot has been shut down.");
    Ok(())
}
