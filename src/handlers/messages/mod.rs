//! Message handlers module
//!
//! Handles incoming text messages and shared contacts: free text belongs to
//! the registration flow while it is active, menu buttons start flows, and
//! the master keyboard drives the master menu.

use tracing::debug;
use crate::handlers::commands::{appointments, booking, master, start};
use crate::handlers::{keyboards, reply, Sender};
use crate::state::{flows, steps, AppContext, ConversationContext};
use crate::texts;
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_text(app: &AppContext, sender: &Sender, text: &str) -> Result<()> {
    debug!(user_id = sender.user_id, "Processing text message");

    let context = app.state_storage.load_context(sender.user_id).await;

    if let Some(context) = context.as_ref().filter(|c| c.is_in_scenario(flows::REGISTRATION)) {
        return handle_registration_text(app, sender, context.clone(), text).await;
    }

    match text {
        texts::BTN_BOOK => return booking::start_booking(app, sender).await,
        texts::BTN_MY_BOOKINGS => return appointments::show_my_bookings(app, sender).await,
        texts::BTN_CANCEL_BOOKING => return appointments::start_cancellation(app, sender).await,
        texts::BTN_MASTER_MODE => return master::handle_master_menu(app, sender).await,
        _ => {}
    }

    match context {
        Some(context) if context.is_at(flows::MASTER_MENU, steps::MENU) => {
            master::handle_master_action(app, sender, context, text).await
        }
        _ => reply(app, sender, texts::UNKNOWN_INPUT, keyboards::main_menu()).await,
    }
}

async fn handle_registration_text(
    app: &AppContext,
    sender: &Sender,
    context: ConversationContext,
    text: &str,
) -> Result<()> {
    match context.step.as_deref() {
        Some(steps::NAME_INPUT) => start::handle_name_input(app, sender, context, text).await,
        Some(steps::PHONE_CHOICE) => start::handle_phone_choice(app, sender, context).await,
        Some(steps::PHONE_MANUAL) => start::handle_phone_manual(app, sender, context, text).await,
        step => {
            debug!(user_id = sender.user_id, step = ?step, "Unknown registration step, restarting");
            start::handle_start(app, sender).await
        }
    }
}

/// Handle a shared contact; only meaningful while asking for the phone number
pub async fn handle_contact(app: &AppContext, sender: &Sender, phone: &str) -> Result<()> {
    match app.state_storage.load_context(sender.user_id).await {
        Some(context)
            if context.is_at(flows::REGISTRATION, steps::PHONE_CHOICE)
                || context.is_at(flows::REGISTRATION, steps::PHONE_MANUAL) =>
        {
            start::handle_contact(app, sender, context, phone).await
        }
        _ => {
            debug!(user_id = sender.user_id, "Contact outside of registration");
            reply(app, sender, texts::UNKNOWN_INPUT, keyboards::main_menu()).await
        }
    }
}
