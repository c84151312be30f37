//! Command handlers module
//!
//! Handlers for bot commands and the flows they start. Each flow module also
//! owns the steps that later messages and callbacks drive.

pub mod appointments;
pub mod booking;
pub mod help;
pub mod master;
pub mod start;

use teloxide::utils::command::BotCommands;
use tracing::debug;
use crate::state::AppContext;
use crate::utils::errors::Result;
use super::{keyboards, reply, Sender};
use crate::texts;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "NailBuddy commands:")]
pub enum Command {
    #[command(description = "Register or show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Book an appointment")]
    Book,
    #[command(description = "List your appointments")]
    Bookings,
    #[command(description = "Master menu (master only)")]
    Master,
    #[command(description = "Abort the current action")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(app: &AppContext, sender: &Sender, command: Command) -> Result<()> {
    debug!(user_id = sender.user_id, command = ?command, "Processing command");

    match command {
        Command::Start => start::handle_start(app, sender).await,
        Command::Help => help::handle_help(app, sender).await,
        Command::Book => booking::start_booking(app, sender).await,
        Command::Bookings => appointments::show_my_bookings(app, sender).await,
        Command::Master => master::handle_master_menu(app, sender).await,
        Command::Cancel => handle_abort(app, sender).await,
    }
}

/// /cancel: leave whatever flow is active and return to the main menu
async fn handle_abort(app: &AppContext, sender: &Sender) -> Result<()> {
    app.state_storage.delete_context(sender.user_id).await;
    reply(app, sender, texts::FLOW_ABORTED, keyboards::main_menu()).await
}
