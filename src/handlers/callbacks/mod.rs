//! Callback query handlers module
//!
//! Routes inline keyboard taps to the flow step that issued the keyboard.
//! Callback data is `action:argument`, split on the first colon.

use tracing::{debug, warn};
use crate::handlers::commands::{appointments, booking};
use crate::handlers::{reply, Sender};
use crate::messenger::{Markup, MessageRef};
use crate::state::{flows, steps, AppContext};
use crate::texts;
use crate::utils::errors::Result;
use crate::utils::helpers::{parse_date, parse_time};

/// Main callback query dispatcher
pub async fn handle_callback_query(
    app: &AppContext,
    sender: &Sender,
    data: &str,
    target: Option<MessageRef>,
) -> Result<()> {
    debug!(user_id = sender.user_id, callback_data = %data, "Processing callback query");

    let (action, argument) = data.split_once(':').unwrap_or((data, ""));

    if data == "cal:ignore" {
        return Ok(());
    }

    let Some(context) = app.state_storage.load_context(sender.user_id).await else {
        debug!(user_id = sender.user_id, callback_data = %data, "Callback without an active flow");
        return reply(app, sender, texts::SESSION_EXPIRED, Markup::None).await;
    };

    let expected_step = match action {
        "service" => (flows::BOOKING, steps::SERVICE_SELECTION),
        "cal" => (flows::BOOKING, steps::DATE_SELECTION),
        "time" => (flows::BOOKING, steps::TIME_SELECTION),
        "confirm" => (flows::BOOKING, steps::CONFIRMATION),
        "cancel" => (flows::CANCELLATION, steps::APPOINTMENT_SELECTION),
        _ => {
            warn!(callback_data = %data, "Unknown callback action");
            return Ok(());
        }
    };

    if !context.is_at(expected_step.0, expected_step.1) {
        debug!(user_id = sender.user_id, state = ?context.current_state(), callback_data = %data,
               "Stale callback for another step");
        return reply(app, sender, texts::SESSION_EXPIRED, Markup::None).await;
    }

    match action {
        "service" => match argument.parse::<usize>() {
            Ok(position) => booking::handle_service_selected(app, sender, context, target, position).await,
            Err(_) => invalid(data),
        },
        "cal" => match argument.split_once(':') {
            Some(("nav", offset)) => match offset.parse::<i32>() {
                Ok(offset) => booking::handle_month_navigation(app, sender, context, target, offset).await,
                Err(_) => invalid(data),
            },
            Some(("day", date)) => match parse_date(date) {
                Some(date) => booking::handle_day_selected(app, sender, context, target, date).await,
                None => invalid(data),
            },
            _ => invalid(data),
        },
        "time" => match parse_time(argument) {
            Some(time) => booking::handle_time_selected(app, sender, context, target, time).await,
            None => invalid(data),
        },
        "confirm" => match argument {
            "yes" => booking::handle_confirmation(app, sender, context, target, true).await,
            "no" => booking::handle_confirmation(app, sender, context, target, false).await,
            _ => invalid(data),
        },
        _ => appointments::handle_cancel_selected(app, sender, context, target, argument).await,
    }
}

fn invalid(data: &str) -> Result<()> {
    warn!(callback_data = %data, "Invalid callback data format");
    Ok(())
}
