//! Master (operator) menu
//!
//! Read-only schedule views, available to the configured master only.

use tracing::{debug, info};
use crate::handlers::{keyboards, reply, show_main_menu, Sender};
use crate::messenger::Markup;
use crate::state::{flows, AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::Result;
use crate::utils::logging::log_master_action;

/// "👨‍💼 Режим мастера" and /master
pub async fn handle_master_menu(app: &AppContext, sender: &Sender) -> Result<()> {
    if !app.services.auth_service.is_master(sender.user_id) {
        debug!(user_id = sender.user_id, "Master menu denied");
        return reply(app, sender, texts::ACCESS_DENIED, Markup::None).await;
    }

    let mut context = ConversationContext::new(sender.user_id);
    app.scenario_manager.start_scenario(&mut context, flows::MASTER_MENU)?;
    app.state_storage.save_context(&context).await;

    info!(user_id = sender.user_id, "Master opened the menu");
    reply(app, sender, texts::MASTER_MENU_TITLE, keyboards::master_menu()).await
}

/// One of the master keyboard buttons
pub async fn handle_master_action(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    text: &str,
) -> Result<()> {
    if !app.services.auth_service.is_master(sender.user_id) {
        app.state_storage.delete_context(sender.user_id).await;
        return reply(app, sender, texts::ACCESS_DENIED, Markup::None).await;
    }

    if app.scenario_manager.validate_input(&context, text).is_err() {
        return reply(app, sender, texts::MASTER_MENU_TITLE, keyboards::master_menu()).await;
    }

    let schedule = &app.services.schedule_service;
    let message = match text {
        texts::BTN_MASTER_TODAY => {
            log_master_action(sender.user_id, "today");
            texts::day_listing("сегодня", &schedule.today().await?)
        }
        texts::BTN_MASTER_TOMORROW => {
            log_master_action(sender.user_id, "tomorrow");
            texts::day_listing("завтра", &schedule.tomorrow().await?)
        }
        texts::BTN_MASTER_ALL => {
            log_master_action(sender.user_id, "all_active");
            texts::all_active_listing(&schedule.upcoming_by_date().await?)
        }
        texts::BTN_MASTER_STATS => {
            log_master_action(sender.user_id, "statistics");
            let stats = schedule.statistics().await?;
            texts::statistics(
                stats.clients,
                stats.total_appointments,
                stats.confirmed,
                stats.cancelled,
                stats.upcoming,
                stats.top_service.as_ref().map(|(name, count)| (name.as_str(), *count)),
            )
        }
        _ => {
            app.state_storage.delete_context(context.user_id).await;
            return show_main_menu(app, sender).await;
        }
    };

    reply(app, sender, message, Markup::None).await
}
